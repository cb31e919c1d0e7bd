//! Configuration errors.
//!
//! Every variant indicates a mistake in how a kind or rule table was set up,
//! never a property of the input data. Rules that merely do not apply report
//! that through their return value instead.

use thiserror::Error;

/// Errors raised while configuring kinds or constructing expressions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A stage that sorts operands was configured without an order key.
    #[error("kind `{kind}` uses {stage} but has no order key")]
    MissingOrderKey {
        /// The kind name.
        kind: String,
        /// The stage that needs the key.
        stage: &'static str,
    },

    /// The configured order key is undefined for an operand.
    #[error("order key of kind `{kind}` is undefined for operand {operand}")]
    UnorderableOperand {
        /// The kind name.
        kind: String,
        /// The offending operand, rendered.
        operand: String,
    },

    /// Filter-neutral was configured without a neutral element.
    #[error("kind `{kind}` filters its neutral element but has none")]
    MissingNeutralElement {
        /// The kind name.
        kind: String,
    },

    /// A binary rule pattern does not have exactly two positions.
    #[error("binary rule {index} of kind `{kind}` has arity {arity}, expected 2")]
    BinaryRuleArity {
        /// The kind name.
        kind: String,
        /// Position of the rule in the table.
        index: usize,
        /// The arity found.
        arity: usize,
    },

    /// Two wildcards in one pattern share a name but not a declaration.
    #[error("wildcard `{name}` is declared twice with different constraints")]
    InconsistentWildcard {
        /// The wildcard name.
        name: String,
    },

    /// A pattern or constructor references a head nobody declared.
    #[error("undeclared head {head}")]
    UndeclaredHead {
        /// The head, rendered.
        head: String,
    },

    /// A kind name was registered twice.
    #[error("kind `{kind}` is already registered")]
    DuplicateKind {
        /// The kind name.
        kind: String,
    },

    /// A kind name was looked up but never registered.
    #[error("kind `{kind}` is not registered")]
    UnknownKind {
        /// The kind name.
        kind: String,
    },

    /// The binary stage runs before (or without) flattening.
    #[error("kind `{kind}` runs binary rules without flattening first")]
    BinaryWithoutFlatten {
        /// The kind name.
        kind: String,
    },

    /// The pipeline kept changing the operands.
    #[error("construction of `{kind}` did not reach a fixpoint within {passes} passes")]
    NoFixpoint {
        /// The kind name.
        kind: String,
        /// The pass limit that was hit.
        passes: usize,
    },
}
