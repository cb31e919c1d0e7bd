//! The operation construction pipeline.
//!
//! Construction threads the raw operands through the kind's stages, in order,
//! and repeats whole passes until a pass changes nothing. A stage may collapse
//! the construction to a single value (the neutral element), which is returned
//! at once. Afterwards a lone operand is returned by itself, an empty sequence
//! becomes the neutral element, and anything else is wrapped in a composite.

use std::sync::Arc;

use log::{debug, trace};
use termalg_core::{ConfigError, Expr, Kind, Operands};

use crate::kind::OperationKind;
use crate::outcome::Outcome;
use crate::rules::Simplified;

/// Options for a single construction.
#[derive(Clone, Debug)]
pub struct ConstructOptions {
    /// Maximum number of full passes over the stages.
    pub pass_limit: usize,
}

impl Default for ConstructOptions {
    fn default() -> Self {
        Self { pass_limit: 32 }
    }
}

impl ConstructOptions {
    /// Sets the pass limit.
    #[must_use]
    pub fn with_pass_limit(mut self, pass_limit: usize) -> Self {
        self.pass_limit = pass_limit;
        self
    }
}

/// Constructs the canonical expression of `kind` over `operands`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a stage finds the kind misconfigured, or
/// [`ConfigError::NoFixpoint`] if the stages keep changing the operands for
/// more than `options.pass_limit` passes.
pub fn construct(
    kind: &Arc<OperationKind>,
    operands: impl IntoIterator<Item = Expr>,
    options: &ConstructOptions,
) -> Result<Expr, ConfigError> {
    run(kind, &kind.kind(), operands.into_iter().collect(), options)
}

pub(crate) fn run(
    config: &OperationKind,
    kind: &Kind,
    mut operands: Operands,
    options: &ConstructOptions,
) -> Result<Expr, ConfigError> {
    for pass in 0..options.pass_limit {
        let mut changed = false;
        for stage in config.simplifications() {
            match stage.apply(config, &operands)? {
                Outcome::NotApplicable => {}
                Outcome::Applied(Simplified::Collapse(value)) => {
                    debug!("{}: {} collapsed to {value}", config.name(), stage.name());
                    return Ok(value);
                }
                Outcome::Applied(Simplified::Operands(next)) => {
                    if next != operands {
                        trace!("{}: {} -> {next:?}", config.name(), stage.name());
                        operands = next;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return Ok(finish(config, kind, operands));
        }
        trace!("{}: pass {pass} changed the operands", config.name());
    }

    Err(ConfigError::NoFixpoint {
        kind: config.name().to_string(),
        passes: options.pass_limit,
    })
}

fn finish(config: &OperationKind, kind: &Kind, mut operands: Operands) -> Expr {
    if operands.len() == 1 {
        if let Some(only) = operands.pop() {
            return only;
        }
    }
    match config.neutral_element() {
        Some(neutral) if operands.is_empty() => neutral.clone(),
        _ => Expr::new_operation(kind.clone(), operands),
    }
}
