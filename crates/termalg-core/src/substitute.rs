//! Substitution of sub-expressions.
//!
//! A substitution maps expressions to replacements. Lookup is structural, so
//! mapping `LocalSpace("1")` replaces every occurrence of that space. Singletons
//! are only replaced when the mapping names their own key; otherwise the very
//! same handle comes back. Composites whose operands change are rebuilt through
//! their kind so the result stays canonical.

use hashbrown::HashMap;
use log::trace;

use crate::error::ConfigError;
use crate::expr::{ExprNode, Operands};
use crate::handle::Expr;

/// A mapping from expressions to their replacements.
pub type Substitution = HashMap<Expr, Expr>;

/// Applies `mapping` throughout `expr`.
///
/// Traversal is depth-first in operand order. Replacements are not
/// substituted again.
///
/// # Errors
///
/// Returns an error if rebuilding a changed composite fails.
pub fn substitute(expr: &Expr, mapping: &Substitution) -> Result<Expr, ConfigError> {
    if mapping.is_empty() {
        return Ok(expr.clone());
    }
    if let Some(replacement) = mapping.get(expr) {
        trace!("substitute {expr} -> {replacement}");
        return Ok(replacement.clone());
    }

    match expr.node() {
        ExprNode::Integer(_)
        | ExprNode::Text(_)
        | ExprNode::Symbol(_)
        | ExprNode::Singleton(_) => Ok(expr.clone()),
        ExprNode::Atom { head, params } => match substitute_all(params, mapping)? {
            Some(params) => Ok(Expr::new(ExprNode::Atom {
                head: head.clone(),
                params,
            })),
            None => Ok(expr.clone()),
        },
        ExprNode::Operation { kind, operands } => match substitute_all(operands, mapping)? {
            Some(operands) => kind.rebuild(operands),
            None => Ok(expr.clone()),
        },
    }
}

/// Substitutes into each child; `None` if nothing changed.
fn substitute_all(
    children: &[Expr],
    mapping: &Substitution,
) -> Result<Option<Operands>, ConfigError> {
    let mut changed = false;
    let mut out = Operands::with_capacity(children.len());
    for child in children {
        let new = substitute(child, mapping)?;
        changed |= !new.ptr_eq(child);
        out.push(new);
    }
    Ok(changed.then_some(out))
}

impl Expr {
    /// Applies a substitution, see [`substitute`].
    ///
    /// # Errors
    ///
    /// Returns an error if rebuilding a changed composite fails.
    pub fn substitute(&self, mapping: &Substitution) -> Result<Expr, ConfigError> {
        substitute(self, mapping)
    }
}
