//! A construction engine with optional memoization.
//!
//! Construction is a pure function of the kind and its raw operands, so the
//! engine may cache results by that pair. A cached result is always equal to
//! what a fresh construction would return.
//!
//! Kinds are told apart by identity, not by name: the engine is not tied to
//! a registry, so two distinct kinds may share a name.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use termalg_core::{ConfigError, Expr, Operands};

use crate::kind::OperationKind;
use crate::memo::MemoTable;
use crate::pipeline::{self, ConstructOptions};

/// Configuration for the engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Whether construction results are cached.
    pub memoize: bool,
    /// Maximum number of cached results.
    pub memo_capacity: usize,
    /// Options passed to every construction.
    pub construct: ConstructOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            memo_capacity: 4096,
            construct: ConstructOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Enables or disables memoization.
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Sets the memo capacity.
    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }

    /// Sets the construction options.
    #[must_use]
    pub fn with_construct_options(mut self, options: ConstructOptions) -> Self {
        self.construct = options;
        self
    }
}

/// A memo key: the kind, compared by address, and the raw operands.
///
/// Holding the `Arc` keeps the address from being reused while the entry
/// is cached.
#[derive(Clone, Debug)]
struct MemoKey {
    kind: Arc<OperationKind>,
    operands: Operands,
}

impl PartialEq for MemoKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) && self.operands == other.operands
    }
}

impl Eq for MemoKey {}

impl Hash for MemoKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.kind) as *const () as usize).hash(state);
        self.operands.hash(state);
    }
}

/// Constructs expressions, caching results when configured to.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    memo: Mutex<MemoTable<MemoKey, Expr>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let capacity = if config.memoize { config.memo_capacity } else { 0 };
        Self {
            memo: Mutex::new(MemoTable::with_capacity(capacity)),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Constructs the canonical expression of `kind` over `operands`.
    ///
    /// # Errors
    ///
    /// See [`pipeline::construct`]. Errors are never cached.
    pub fn construct(
        &self,
        kind: &Arc<OperationKind>,
        operands: impl IntoIterator<Item = Expr>,
    ) -> Result<Expr, ConfigError> {
        let operands: Operands = operands.into_iter().collect();
        if !self.config.memoize {
            return pipeline::construct(kind, operands, &self.config.construct);
        }

        let key = MemoKey {
            kind: Arc::clone(kind),
            operands,
        };
        if let Some(hit) = self.memo.lock().get(&key) {
            trace!("{}: memo hit", kind.name());
            return Ok(hit);
        }

        // The lock is not held while constructing; replacements may call back
        // into the engine.
        let result = pipeline::construct(kind, key.operands.iter().cloned(), &self.config.construct)?;
        self.memo.lock().insert(key, result.clone());
        Ok(result)
    }

    /// Returns memo statistics.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let memo = self.memo.lock();
        EngineStats {
            hits: memo.hits(),
            misses: memo.misses(),
            entries: memo.len(),
        }
    }

    /// Drops every cached result.
    pub fn clear_memo(&self) {
        self.memo.lock().clear();
    }
}

/// Memo statistics of an [`Engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Lookups answered from the memo.
    pub hits: u64,
    /// Lookups that ran the pipeline.
    pub misses: u64,
    /// Results currently cached.
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Simplification;
    use termalg_core::expr_order_key;

    fn orderless() -> Arc<OperationKind> {
        OperationKind::builder("Orderless")
            .order_key(expr_order_key)
            .simplifications([Simplification::Flatten, Simplification::Reorder])
            .build()
            .unwrap()
    }

    #[test]
    fn test_memo_hits() {
        let engine = Engine::new();
        let kind = orderless();
        let ops = [Expr::integer(3), Expr::integer(1), Expr::integer(2)];

        let first = engine.construct(&kind, ops.clone()).unwrap();
        let second = engine.construct(&kind, ops).unwrap();
        assert_eq!(first, second);
        assert!(first.ptr_eq(&second));

        assert_eq!(
            engine.stats(),
            EngineStats {
                hits: 1,
                misses: 1,
                entries: 1,
            }
        );

        engine.clear_memo();
        assert_eq!(engine.stats().entries, 0);
    }

    #[test]
    fn test_memo_matches_plain_construction() {
        let kind = orderless();
        let cached = Engine::new();
        let plain = Engine::with_config(EngineConfig::default().with_memoize(false));
        for ops in [[5, 1, 3], [1, 3, 5], [3, 5, 1]] {
            let ops: Vec<Expr> = ops.into_iter().map(Expr::integer).collect();
            assert_eq!(
                cached.construct(&kind, ops.clone()).unwrap(),
                plain.construct(&kind, ops).unwrap()
            );
        }
        assert_eq!(plain.stats(), EngineStats::default());
    }

    #[test]
    fn test_same_name_kinds_do_not_share_memo() {
        let flat = OperationKind::builder("K")
            .simplifications([Simplification::Flatten])
            .build()
            .unwrap();
        let sorted = OperationKind::builder("K")
            .order_key(expr_order_key)
            .simplifications([Simplification::Flatten, Simplification::Reorder])
            .build()
            .unwrap();
        let ops = [Expr::integer(3), Expr::integer(1)];

        let engine = Engine::new();
        let from_flat = engine.construct(&flat, ops.clone()).unwrap();
        let from_sorted = engine.construct(&sorted, ops.clone()).unwrap();

        assert_eq!(from_flat, flat.create(ops.clone()).unwrap());
        assert_eq!(from_sorted, sorted.create(ops).unwrap());
        assert_ne!(from_flat, from_sorted);
        assert_eq!(engine.stats().entries, 2);
        assert_eq!(engine.stats().hits, 0);
    }
}
