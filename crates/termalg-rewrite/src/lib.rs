//! # termalg-rewrite
//!
//! Canonical construction of n-ary operations for the termalg engine.
//!
//! This crate provides:
//! - Operation kinds configured with ordered simplification stages
//! - Stages for associativity, commutativity, identity and idempotence
//! - A pairwise pattern-match-and-replace driver with a wildcard pattern language
//! - A registry of kinds and atom heads, an engine with memoization, and a
//!   bottom-up simplifier for whole trees
//!
//! ## Construction
//!
//! Every composite is built through its kind's pipeline. Stages run in the
//! configured order and repeat until nothing changes, so the value returned
//! by [`construct`] is canonical: equal inputs up to the kind's algebraic
//! laws yield structurally equal results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binary;
pub mod engine;
pub mod kind;
pub mod memo;
pub mod outcome;
pub mod pattern;
pub mod pipeline;
pub mod registry;
pub mod rules;
pub mod simplify;

#[cfg(test)]
mod proptests;

pub use binary::{match_replace_binary, BinaryRule};
pub use engine::{Engine, EngineConfig, EngineStats};
pub use kind::{OperationKind, OperationKindBuilder};
pub use outcome::Outcome;
pub use pattern::{match_pattern, pattern_head, wc, Bindings, Pattern, Wildcard};
pub use pipeline::{construct, ConstructOptions};
pub use registry::Registry;
pub use rules::{Simplification, Simplified};
pub use simplify::{ExprRule, SimplificationStats, Simplifier, SimplifierConfig};
