//! A registry of declared atom heads and operation kinds.
//!
//! Kinds are registered once, after their atom heads have been declared, so
//! every head a binary rule refers to is known before any construction runs.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use log::debug;
use termalg_core::{ConfigError, Expr, Head};

use crate::kind::OperationKind;
use crate::pipeline::{self, ConstructOptions};

/// Declared atom heads and registered kinds, by name.
#[derive(Debug, Default)]
pub struct Registry {
    atoms: HashSet<Arc<str>>,
    kinds: HashMap<Arc<str>, Arc<OperationKind>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an atom head. Declaring it again has no effect.
    pub fn declare_atom(&mut self, head: &str) {
        if self.atoms.insert(Arc::from(head)) {
            debug!("declared atom head {head}");
        }
    }

    /// Returns true if `head` is a built-in head, a declared atom head or a
    /// registered kind.
    #[must_use]
    pub fn is_declared(&self, head: &Head) -> bool {
        match head {
            Head::Atom(name) => self.atoms.contains(name),
            Head::Operation(name) => self.kinds.contains_key(name),
            _ => head.is_builtin(),
        }
    }

    /// Registers a kind.
    ///
    /// A kind's rules may refer to the kind itself.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKind`] if the name is taken, or
    /// [`ConfigError::UndeclaredHead`] if a binary rule pattern refers to an
    /// unknown head.
    pub fn register(&mut self, kind: Arc<OperationKind>) -> Result<(), ConfigError> {
        if self.kinds.contains_key(kind.name()) {
            return Err(ConfigError::DuplicateKind {
                kind: kind.name().to_string(),
            });
        }

        for head in kind.referenced_heads() {
            let own = matches!(&head, Head::Operation(name) if &**name == kind.name());
            if !own && !self.is_declared(&head) {
                return Err(ConfigError::UndeclaredHead {
                    head: head.to_string(),
                });
            }
        }

        debug!("registered kind {}", kind.name());
        self.kinds.insert(kind.shared_name(), kind);
        Ok(())
    }

    /// Looks up a kind by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<OperationKind>> {
        self.kinds.get(name)
    }

    /// Constructs an expression of the kind named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKind`] if no such kind is registered,
    /// otherwise whatever the construction itself returns.
    pub fn construct(
        &self,
        name: &str,
        operands: impl IntoIterator<Item = Expr>,
    ) -> Result<Expr, ConfigError> {
        let kind = self.get(name).ok_or_else(|| ConfigError::UnknownKind {
            kind: name.to_string(),
        })?;
        pipeline::construct(kind, operands, &ConstructOptions::default())
    }

    /// Creates an atom with a declared head.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndeclaredHead`] if `head` was never declared.
    pub fn atom(
        &self,
        head: &str,
        params: impl IntoIterator<Item = Expr>,
    ) -> Result<Expr, ConfigError> {
        if !self.atoms.contains(head) {
            return Err(ConfigError::UndeclaredHead {
                head: Head::atom(head).to_string(),
            });
        }
        Ok(Expr::atom(head, params))
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if no kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
