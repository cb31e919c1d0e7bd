//! Expression node types.
//!
//! This module defines the immutable nodes behind every [`Expr`] handle and
//! the closed set of [`Head`]s used to classify them.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::handle::Expr;
use crate::kind::Kind;

/// Inline storage for operand and parameter lists.
pub type Operands = SmallVec<[Expr; 4]>;

/// An expression node.
///
/// Atoms carry no children except for domain atoms, whose parameters are
/// themselves expressions (so that substitution can reach them). Composite
/// nodes are operations of a given [`Kind`] over an ordered operand list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// A 64-bit integer literal.
    Integer(i64),

    /// A string literal.
    Text(Arc<str>),

    /// A named symbol.
    Symbol(Arc<str>),

    /// A singleton value, identified only by its key.
    ///
    /// There is exactly one value per key; substitution never looks inside it.
    Singleton(Arc<str>),

    /// An opaque domain value supplied by a concrete algebra.
    Atom {
        /// The declared head name, e.g. `LocalSpace`.
        head: Arc<str>,
        /// Structural parameters of the value.
        params: Operands,
    },

    // === Composites ===
    /// An n-ary operation.
    Operation {
        /// The operation kind.
        kind: Kind,
        /// The ordered operands.
        operands: Operands,
    },
}

impl ExprNode {
    /// Returns true if this node is not an operation.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        !matches!(self, ExprNode::Operation { .. })
    }

    /// Returns the head of this node.
    #[must_use]
    pub fn head(&self) -> Head {
        match self {
            ExprNode::Integer(_) => Head::Integer,
            ExprNode::Text(_) => Head::Text,
            ExprNode::Symbol(_) => Head::Symbol,
            ExprNode::Singleton(_) => Head::Singleton,
            ExprNode::Atom { head, .. } => Head::Atom(head.clone()),
            ExprNode::Operation { kind, .. } => Head::Operation(kind.name_arc()),
        }
    }

    /// Returns the children of this node: operands of an operation or
    /// parameters of a domain atom.
    #[must_use]
    pub fn children(&self) -> &[Expr] {
        match self {
            ExprNode::Atom { params, .. } => params,
            ExprNode::Operation { operands, .. } => operands,
            _ => &[],
        }
    }
}

/// The value-kind tag of an expression.
///
/// Wildcard constraints compare heads by value. The builtin heads are always
/// known; `Atom` heads are declared by concrete algebras and `Operation` heads
/// name registered operation kinds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Head {
    /// Integer literals.
    Integer,
    /// String literals.
    Text,
    /// Symbols.
    Symbol,
    /// Singleton values.
    Singleton,
    /// Domain atoms with the given head name.
    Atom(Arc<str>),
    /// Operations of the named kind.
    Operation(Arc<str>),
}

impl Head {
    /// Head of domain atoms named `name`.
    #[must_use]
    pub fn atom(name: &str) -> Self {
        Head::Atom(Arc::from(name))
    }

    /// Head of operations of the kind named `name`.
    #[must_use]
    pub fn operation(name: &str) -> Self {
        Head::Operation(Arc::from(name))
    }

    /// Returns true for heads that exist without any declaration.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(
            self,
            Head::Integer | Head::Text | Head::Symbol | Head::Singleton
        )
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Integer => f.write_str("Integer"),
            Head::Text => f.write_str("Text"),
            Head::Symbol => f.write_str("Symbol"),
            Head::Singleton => f.write_str("Singleton"),
            Head::Atom(name) => write!(f, "Atom({name})"),
            Head::Operation(name) => write!(f, "Operation({name})"),
        }
    }
}
