//! Associativity.

use termalg_core::{Expr, Operands};

use crate::outcome::Outcome;

/// Splices the operands of every operand that is itself of kind `kind`.
///
/// Flattens one level; nested structure collapses fully because the pipeline
/// repeats its stages until nothing changes. Relative order is preserved.
pub fn flatten(kind: &str, operands: &[Expr]) -> Outcome<Operands> {
    if !operands.iter().any(|op| op.is_operation_of(kind)) {
        return Outcome::NotApplicable;
    }

    let mut out = Operands::with_capacity(operands.len());
    for op in operands {
        if op.is_operation_of(kind) {
            out.extend(op.children().iter().cloned());
        } else {
            out.push(op.clone());
        }
    }
    Outcome::Applied(out)
}
