//! Commutativity.

use termalg_core::{ConfigError, Expr, Operands, OrderKey, SortKey};

use crate::outcome::Outcome;

/// Sorts operands ascending by `key`; stable for equal keys.
///
/// # Errors
///
/// Returns [`ConfigError::UnorderableOperand`] if `key` is undefined for an
/// operand.
pub fn reorder(
    kind: &str,
    key: OrderKey,
    operands: &[Expr],
) -> Result<Outcome<Operands>, ConfigError> {
    let keys = sort_keys(kind, key, operands)?;
    if keys.windows(2).all(|w| w[0] <= w[1]) {
        return Ok(Outcome::NotApplicable);
    }

    let mut keyed: Vec<(SortKey, &Expr)> = keys.into_iter().zip(operands).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Outcome::Applied(
        keyed.into_iter().map(|(_, op)| op.clone()).collect(),
    ))
}

fn sort_keys(kind: &str, key: OrderKey, operands: &[Expr]) -> Result<Vec<SortKey>, ConfigError> {
    operands
        .iter()
        .map(|op| {
            key(op).ok_or_else(|| ConfigError::UnorderableOperand {
                kind: kind.to_string(),
                operand: op.to_string(),
            })
        })
        .collect()
}
