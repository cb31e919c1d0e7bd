//! Idempotence.

use hashbrown::HashSet;
use termalg_core::{ConfigError, Expr, Operands, OrderKey};

use crate::outcome::Outcome;
use crate::rules::orderby;

/// Drops operands structurally equal to an earlier one.
///
/// With an order key the survivors are then sorted by it, so the result is
/// independent of the input order. Without one, first occurrences keep their
/// positions.
///
/// # Errors
///
/// Returns [`ConfigError::UnorderableOperand`] if `key` is undefined for an
/// operand.
pub fn deduplicate(
    kind: &str,
    key: Option<OrderKey>,
    operands: &[Expr],
) -> Result<Outcome<Operands>, ConfigError> {
    let mut seen = HashSet::with_capacity(operands.len());
    let unique: Operands = operands
        .iter()
        .filter(|op| seen.insert(*op))
        .cloned()
        .collect();

    let result = match key {
        Some(key) => orderby::reorder(kind, key, &unique)?.applied().unwrap_or(unique),
        None => unique,
    };

    if result.as_slice() == operands {
        Ok(Outcome::NotApplicable)
    } else {
        Ok(Outcome::Applied(result))
    }
}
