//! Operation kinds.
//!
//! A [`Kind`] tags every composite expression. The behaviour behind a kind
//! (its simplification pipeline) lives in the rewriting crate; this crate only
//! needs to name kinds and to rebuild composites after substitution.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::ConfigError;
use crate::expr::Operands;
use crate::handle::Expr;

/// The class of an n-ary operation.
pub trait OperationClass: Send + Sync {
    /// The unique name of the kind.
    fn name(&self) -> &str;

    /// Creates a canonical expression of this kind from new operands.
    ///
    /// `kind` is the handle wrapping `self`, to be stored in any composite
    /// that results.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is misconfigured for these operands.
    fn rebuild(&self, kind: &Kind, operands: Operands) -> Result<Expr, ConfigError>;
}

/// A shared handle to an [`OperationClass`].
///
/// Kinds compare, hash and order by name only. Kind names are expected to be
/// unique within one algebra.
#[derive(Clone)]
pub struct Kind {
    class: Arc<dyn OperationClass>,
    name: Arc<str>,
}

impl Kind {
    /// Wraps an operation class.
    #[must_use]
    pub fn new(class: Arc<dyn OperationClass>) -> Self {
        let name = Arc::from(class.name());
        Self { class, name }
    }

    /// Returns the kind name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        self.name.clone()
    }

    /// Returns the underlying class.
    #[must_use]
    pub fn class(&self) -> &Arc<dyn OperationClass> {
        &self.class
    }

    /// Rebuilds a composite of this kind through the class's pipeline.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from the class.
    pub fn rebuild(&self, operands: Operands) -> Result<Expr, ConfigError> {
        self.class.rebuild(self, operands)
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Kind {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kind {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A kind that wraps operands verbatim.
    pub(crate) struct Verbatim(pub &'static str);

    impl OperationClass for Verbatim {
        fn name(&self) -> &str {
            self.0
        }

        fn rebuild(&self, kind: &Kind, operands: Operands) -> Result<Expr, ConfigError> {
            Ok(Expr::new_operation(kind.clone(), operands))
        }
    }

    pub(crate) fn verbatim(name: &'static str) -> Kind {
        Kind::new(Arc::new(Verbatim(name)))
    }

    #[test]
    fn test_kind_identity_by_name() {
        let a = verbatim("Sum");
        let b = verbatim("Sum");
        let c = verbatim("Product");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c < a);
        assert_eq!(format!("{a:?}"), "Kind(Sum)");
    }

    #[test]
    fn test_rebuild_verbatim() {
        let sum = verbatim("Sum");
        let expr = sum
            .rebuild(smallvec::smallvec![Expr::integer(1), Expr::integer(2)])
            .unwrap();

        assert!(expr.is_operation_of("Sum"));
        assert_eq!(expr.children().len(), 2);
        assert_eq!(expr.to_string(), "Sum(1, 2)");
    }
}
