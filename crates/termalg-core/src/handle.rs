//! Shared expression handles.
//!
//! An [`Expr`] is a reference-counted pointer to an immutable [`ExprNode`].
//! Cloning a handle is cheap and never copies the tree; equality and hashing
//! are structural.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::expr::{ExprNode, Head, Operands};
use crate::kind::Kind;

/// A handle to an immutable expression value.
///
/// Two handles are equal if their nodes are structurally equal, regardless of
/// whether they share an allocation. Use [`Expr::ptr_eq`] to test identity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    /// Wraps a node in a new handle.
    #[must_use]
    pub fn new(node: ExprNode) -> Self {
        Self(Arc::new(node))
    }

    /// Returns the node behind this handle.
    #[must_use]
    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// Returns true if both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // === Convenience constructors ===

    /// Creates an integer expression.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::new(ExprNode::Integer(value))
    }

    /// Creates a string expression.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::new(ExprNode::Text(Arc::from(value)))
    }

    /// Creates a symbol expression.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::new(ExprNode::Symbol(Arc::from(name)))
    }

    /// Creates the singleton identified by `key`.
    ///
    /// Algebras normally create each singleton once and keep it in a static,
    /// see [`singleton!`](crate::singleton!).
    #[must_use]
    pub fn singleton(key: &str) -> Self {
        Self::new(ExprNode::Singleton(Arc::from(key)))
    }

    /// Creates a domain atom with the given head name and parameters.
    #[must_use]
    pub fn atom(head: &str, params: impl IntoIterator<Item = Expr>) -> Self {
        Self::new(ExprNode::Atom {
            head: Arc::from(head),
            params: params.into_iter().collect(),
        })
    }

    /// Wraps operands in a composite of `kind` without simplifying them.
    ///
    /// This is the last step of the construction pipeline. Calling it
    /// directly bypasses every rule configured for the kind.
    #[must_use]
    pub fn new_operation(kind: Kind, operands: Operands) -> Self {
        Self::new(ExprNode::Operation { kind, operands })
    }

    // === Queries ===

    /// Returns the head of this expression.
    #[must_use]
    pub fn head(&self) -> Head {
        self.0.head()
    }

    /// Returns true if this expression is not an operation.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        self.0.is_atom()
    }

    /// Returns true if this expression is a singleton.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        matches!(*self.0, ExprNode::Singleton(_))
    }

    /// Returns the operands of an operation or the parameters of an atom.
    #[must_use]
    pub fn children(&self) -> &[Expr] {
        self.0.children()
    }

    /// Returns the operation kind, if this is an operation.
    #[must_use]
    pub fn kind(&self) -> Option<&Kind> {
        match &*self.0 {
            ExprNode::Operation { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Returns true if this is an operation of the kind named `name`.
    #[must_use]
    pub fn is_operation_of(&self, name: &str) -> bool {
        self.kind().is_some_and(|kind| kind.name() == name)
    }

    /// Extracts the value of an integer literal.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match &*self.0 {
            ExprNode::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the value of a string literal.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &*self.0 {
            ExprNode::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the name of a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match &*self.0 {
            ExprNode::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the parameters if this is a domain atom with head `head`.
    #[must_use]
    pub fn atom_params(&self, head: &str) -> Option<&[Expr]> {
        match &*self.0 {
            ExprNode::Atom { head: h, params } if &**h == head => Some(params),
            _ => None,
        }
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Expr::size).sum::<usize>()
    }

    /// Collects the names of all symbols occurring in the tree.
    #[must_use]
    pub fn free_symbols(&self) -> BTreeSet<Arc<str>> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let ExprNode::Symbol(name) = &*expr.0 {
                out.insert(name.clone());
            }
            stack.extend(expr.children());
        }
        out
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, name: &str, args: &[Expr]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ExprNode::Integer(n) => write!(f, "{n}"),
            ExprNode::Text(s) => write!(f, "{s:?}"),
            ExprNode::Symbol(s) | ExprNode::Singleton(s) => f.write_str(s),
            ExprNode::Atom { head, params } => write_args(f, head, params),
            ExprNode::Operation { kind, operands } => write_args(f, kind.name(), operands),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
