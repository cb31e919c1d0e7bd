//! # termalg-core
//!
//! Expression values for the termalg rewriting engine.
//!
//! This crate provides:
//! - Immutable, shareable expression handles with structural equality
//! - A closed set of heads used to classify values
//! - A total canonical ordering over heterogeneous expressions
//! - Singleton values and substitution that preserves them
//!
//! ## Design Principles
//!
//! - **Immutability**: nodes never change after creation; rewriting builds new values
//! - **Cheap sharing**: handles are reference counted and `Send + Sync`
//! - **Value identity**: singletons are identified by key, not by address

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod expr;
pub mod handle;
pub mod kind;
pub mod ordering;
pub mod singleton;
pub mod substitute;

#[cfg(test)]
mod proptests;

#[doc(hidden)]
pub use once_cell;

pub use error::ConfigError;
pub use expr::{ExprNode, Head, Operands};
pub use handle::Expr;
pub use kind::{Kind, OperationClass};
pub use ordering::{compare_expr, expr_order_key, sort_key, OrderKey, SortKey};
pub use singleton::singleton_key;
pub use substitute::{substitute, Substitution};
