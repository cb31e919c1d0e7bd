//! Canonical ordering of expressions.
//!
//! Commutative kinds sort their operands with an order key so that any
//! permutation of the same operands yields the same composite. The default
//! key ranks values by variant first (integers, text, symbols, singletons,
//! domain atoms, operations) and then by contents, recursing into children.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::expr::ExprNode;
use crate::handle::Expr;

/// A totally ordered key derived from the structure of an expression.
///
/// Variant order is significant: it is the rank used by [`compare_expr`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    /// Key of an integer literal.
    Integer(i64),
    /// Key of a string literal.
    Text(Arc<str>),
    /// Key of a symbol.
    Symbol(Arc<str>),
    /// Key of a singleton.
    Singleton(Arc<str>),
    /// Key of a domain atom: head name, then parameter keys.
    Atom(Arc<str>, Vec<SortKey>),
    /// Key of an operation: kind name, then operand keys.
    Operation(Arc<str>, Vec<SortKey>),
    /// Free-form composite key for custom order keys.
    Tuple(Vec<SortKey>),
}

/// An order key function. `None` means the key is undefined for that value.
pub type OrderKey = fn(&Expr) -> Option<SortKey>;

/// The default order key, defined for every expression.
#[must_use]
#[allow(clippy::unnecessary_wraps)]
pub fn expr_order_key(expr: &Expr) -> Option<SortKey> {
    Some(sort_key(expr))
}

/// Computes the structural sort key of an expression.
#[must_use]
pub fn sort_key(expr: &Expr) -> SortKey {
    match expr.node() {
        ExprNode::Integer(n) => SortKey::Integer(*n),
        ExprNode::Text(s) => SortKey::Text(s.clone()),
        ExprNode::Symbol(s) => SortKey::Symbol(s.clone()),
        ExprNode::Singleton(s) => SortKey::Singleton(s.clone()),
        ExprNode::Atom { head, params } => {
            SortKey::Atom(head.clone(), params.iter().map(sort_key).collect())
        }
        ExprNode::Operation { kind, operands } => SortKey::Operation(
            Arc::from(kind.name()),
            operands.iter().map(sort_key).collect(),
        ),
    }
}

/// Compares two expressions in the order of [`sort_key`] without allocating.
#[must_use]
pub fn compare_expr(a: &Expr, b: &Expr) -> Ordering {
    if a.ptr_eq(b) {
        return Ordering::Equal;
    }

    let rank_a = rank(a.node());
    let rank_b = rank(b.node());
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a.node(), b.node()) {
        (ExprNode::Integer(x), ExprNode::Integer(y)) => x.cmp(y),
        (ExprNode::Text(x), ExprNode::Text(y))
        | (ExprNode::Symbol(x), ExprNode::Symbol(y))
        | (ExprNode::Singleton(x), ExprNode::Singleton(y)) => x.cmp(y),
        (ExprNode::Atom { head: h1, params: p1 }, ExprNode::Atom { head: h2, params: p2 }) => {
            h1.cmp(h2).then_with(|| compare_args(p1, p2))
        }
        (
            ExprNode::Operation { kind: k1, operands: o1 },
            ExprNode::Operation { kind: k2, operands: o2 },
        ) => k1.name().cmp(k2.name()).then_with(|| compare_args(o1, o2)),
        _ => Ordering::Equal, // unreachable when ranks agree
    }
}

fn rank(node: &ExprNode) -> u8 {
    match node {
        ExprNode::Integer(_) => 0,
        ExprNode::Text(_) => 1,
        ExprNode::Symbol(_) => 2,
        ExprNode::Singleton(_) => 3,
        ExprNode::Atom { .. } => 4,
        ExprNode::Operation { .. } => 5,
    }
}

fn compare_args(a: &[Expr], b: &[Expr]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match compare_expr(x, y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}
