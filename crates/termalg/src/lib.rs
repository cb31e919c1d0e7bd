//! # termalg
//!
//! A generic term-rewriting engine for symbolic algebra.
//!
//! Concrete algebras declare operation kinds once, each with an ordered list
//! of simplification stages, and then build every composite through its kind.
//! The result is canonical, so structural equality decides algebraic equality
//! up to the laws the kind encodes.
//!
//! ## Features
//!
//! - **Shared values**: immutable expression handles with structural equality
//! - **Algebraic stages**: associativity, commutativity, identity, idempotence
//! - **Pairwise rules**: wildcard patterns over adjacent operands
//! - **Singletons**: identity values that survive substitution unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use termalg::prelude::*;
//!
//! let sum = OperationKind::builder("Sum")
//!     .order_key(expr_order_key)
//!     .simplifications([Simplification::Flatten, Simplification::Reorder])
//!     .build()?;
//!
//! let e = sum.create([Expr::integer(3), Expr::integer(1), Expr::integer(2)])?;
//! assert_eq!(e.to_string(), "Sum(1, 2, 3)");
//! # Ok::<(), ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use termalg_core as core;
pub use termalg_rewrite as rewrite;

pub use termalg_core::singleton;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use termalg_core::{
        expr_order_key, ConfigError, Expr, Head, OrderKey, SortKey, Substitution,
    };
    pub use termalg_rewrite::{
        pattern_head, wc, BinaryRule, Bindings, Engine, EngineConfig, ExprRule, OperationKind,
        Outcome, Pattern, Registry, Simplification, Simplifier,
    };
}
