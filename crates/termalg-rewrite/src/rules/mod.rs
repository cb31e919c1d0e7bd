//! Simplification stages organized by algebraic property.
//!
//! A kind lists its stages in order; the construction pipeline runs them
//! until none changes the operands any more.

pub mod assoc;
pub mod idem;
pub mod neutral;
pub mod orderby;

use std::fmt;
use std::sync::Arc;

use termalg_core::{ConfigError, Expr, Operands};

use crate::binary;
use crate::kind::OperationKind;
use crate::outcome::Outcome;

/// The signature of a custom stage.
pub type StageFn =
    Arc<dyn Fn(&OperationKind, &[Expr]) -> Result<Outcome<Simplified>, ConfigError> + Send + Sync>;

/// What an applied stage produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Simplified {
    /// A new operand sequence.
    Operands(Operands),
    /// The whole construction reduces to this value; later stages are skipped.
    Collapse(Expr),
}

/// One stage of a kind's construction pipeline.
#[derive(Clone)]
pub enum Simplification {
    /// Associativity: splice operands of the same kind.
    Flatten,
    /// Commutativity: sort operands by the kind's order key.
    Reorder,
    /// Identity: drop operands equal to the neutral element.
    FilterNeutral,
    /// Idempotence: drop repeated operands.
    Idempotent,
    /// Apply the kind's binary rules to operand pairs until fixpoint.
    MatchReplaceBinary,
    /// A caller-supplied stage.
    Custom {
        /// Name used in logs.
        name: Arc<str>,
        /// The stage function.
        apply: StageFn,
    },
}

impl Simplification {
    /// Wraps a function as a custom stage.
    pub fn custom(
        name: &str,
        f: impl Fn(&OperationKind, &[Expr]) -> Result<Outcome<Simplified>, ConfigError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Simplification::Custom {
            name: Arc::from(name),
            apply: Arc::new(f),
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Simplification::Flatten => "flatten",
            Simplification::Reorder => "reorder",
            Simplification::FilterNeutral => "filter-neutral",
            Simplification::Idempotent => "idempotent",
            Simplification::MatchReplaceBinary => "match-replace-binary",
            Simplification::Custom { name, .. } => &**name,
        }
    }

    /// Applies the stage to an operand sequence of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind lacks configuration the stage needs.
    pub fn apply(
        &self,
        kind: &OperationKind,
        operands: &[Expr],
    ) -> Result<Outcome<Simplified>, ConfigError> {
        match self {
            Simplification::Flatten => {
                Ok(assoc::flatten(kind.name(), operands).map(Simplified::Operands))
            }
            Simplification::Reorder => {
                let key = kind.order_key().ok_or_else(|| ConfigError::MissingOrderKey {
                    kind: kind.name().to_string(),
                    stage: "reorder",
                })?;
                Ok(orderby::reorder(kind.name(), key, operands)?.map(Simplified::Operands))
            }
            Simplification::FilterNeutral => {
                let neutral =
                    kind.neutral_element()
                        .ok_or_else(|| ConfigError::MissingNeutralElement {
                            kind: kind.name().to_string(),
                        })?;
                Ok(neutral::filter_neutral(neutral, operands))
            }
            Simplification::Idempotent => {
                Ok(idem::deduplicate(kind.name(), kind.order_key(), operands)?
                    .map(Simplified::Operands))
            }
            Simplification::MatchReplaceBinary => binary::match_replace_binary(kind, operands),
            Simplification::Custom { apply, .. } => apply(kind, operands),
        }
    }
}

impl fmt::Debug for Simplification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Simplification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Simplification::Custom { apply: a, .. }, Simplification::Custom { apply: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
