//! Identity elements.

use termalg_core::{Expr, Operands};

use crate::outcome::Outcome;
use crate::rules::Simplified;

/// Drops every operand equal to `neutral`.
///
/// When nothing is left the construction collapses to `neutral` itself.
pub fn filter_neutral(neutral: &Expr, operands: &[Expr]) -> Outcome<Simplified> {
    if !operands.is_empty() && !operands.contains(neutral) {
        return Outcome::NotApplicable;
    }

    let kept: Operands = operands.iter().filter(|op| *op != neutral).cloned().collect();
    if kept.is_empty() {
        Outcome::Applied(Simplified::Collapse(neutral.clone()))
    } else {
        Outcome::Applied(Simplified::Operands(kept))
    }
}
