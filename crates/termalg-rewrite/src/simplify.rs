//! Whole-tree rewriting with expression rules.
//!
//! The construction pipeline only sees one composite at a time. A
//! [`Simplifier`] applies single-expression rules everywhere in a tree,
//! children before parents, and repeats until a pass rewrites nothing.

use std::fmt;
use std::sync::Arc;

use log::debug;
use termalg_core::{ConfigError, Expr, ExprNode, Operands};

use crate::outcome::Outcome;
use crate::pattern::{Bindings, Pattern};

type RuleFn = Arc<dyn Fn(&Bindings) -> Result<Outcome<Expr>, ConfigError> + Send + Sync>;

/// A named rule that rewrites a single expression.
#[derive(Clone)]
pub struct ExprRule {
    name: Arc<str>,
    pattern: Pattern,
    replacement: RuleFn,
}

impl ExprRule {
    /// Creates a rule with an infallible replacement.
    pub fn new(
        name: &str,
        pattern: Pattern,
        f: impl Fn(&Bindings) -> Outcome<Expr> + Send + Sync + 'static,
    ) -> Self {
        Self::try_new(name, pattern, move |bindings| Ok(f(bindings)))
    }

    /// Creates a rule whose replacement may construct expressions and fail.
    pub fn try_new(
        name: &str,
        pattern: Pattern,
        f: impl Fn(&Bindings) -> Result<Outcome<Expr>, ConfigError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Arc::from(name),
            pattern,
            replacement: Arc::new(f),
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tries the rule on one expression.
    ///
    /// # Errors
    ///
    /// Propagates errors from the replacement function.
    pub fn apply(&self, expr: &Expr) -> Result<Outcome<Expr>, ConfigError> {
        match self.pattern.match_expr(expr) {
            Some(bindings) => (self.replacement)(&bindings),
            None => Ok(Outcome::NotApplicable),
        }
    }
}

impl fmt::Debug for ExprRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Configuration for the simplifier.
#[derive(Clone, Debug)]
pub struct SimplifierConfig {
    /// Maximum number of passes over the tree.
    pub iter_limit: usize,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self { iter_limit: 30 }
    }
}

/// Applies expression rules bottom-up until fixpoint.
#[derive(Clone, Debug, Default)]
pub struct Simplifier {
    config: SimplifierConfig,
    rules: Vec<ExprRule>,
}

impl Simplifier {
    /// Creates a simplifier without rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simplifier with custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// Sets the rules (replaces existing rules).
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<ExprRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Adds rules to the existing set.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = ExprRule>) {
        self.rules.extend(rules);
    }

    /// Simplifies an expression.
    ///
    /// # Errors
    ///
    /// Propagates errors from rules and from rebuilding composites.
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, ConfigError> {
        self.simplify_with_stats(expr).map(|(result, _)| result)
    }

    /// Simplifies and returns both the result and statistics.
    ///
    /// # Errors
    ///
    /// Propagates errors from rules and from rebuilding composites.
    pub fn simplify_with_stats(
        &self,
        expr: &Expr,
    ) -> Result<(Expr, SimplificationStats), ConfigError> {
        let mut stats = SimplificationStats::default();
        let mut current = expr.clone();
        while stats.iterations < self.config.iter_limit {
            stats.iterations += 1;
            let before = stats.rewrites;
            current = self.rewrite(&current, &mut stats)?;
            if stats.rewrites == before {
                stats.saturated = true;
                break;
            }
        }
        debug!(
            "simplified in {} passes, {} rewrites, saturated: {}",
            stats.iterations, stats.rewrites, stats.saturated
        );
        Ok((current, stats))
    }

    fn rewrite(&self, expr: &Expr, stats: &mut SimplificationStats) -> Result<Expr, ConfigError> {
        let rebuilt = match expr.node() {
            ExprNode::Atom { head, params } => match self.rewrite_all(params, stats)? {
                Some(params) => Expr::new(ExprNode::Atom {
                    head: head.clone(),
                    params,
                }),
                None => expr.clone(),
            },
            ExprNode::Operation { kind, operands } => match self.rewrite_all(operands, stats)? {
                Some(operands) => kind.rebuild(operands)?,
                None => expr.clone(),
            },
            _ => expr.clone(),
        };

        for rule in &self.rules {
            if let Outcome::Applied(result) = rule.apply(&rebuilt)? {
                if result != rebuilt {
                    debug!("{}: {rebuilt} -> {result}", rule.name());
                    stats.rewrites += 1;
                    return Ok(result);
                }
            }
        }
        Ok(rebuilt)
    }

    fn rewrite_all(
        &self,
        children: &[Expr],
        stats: &mut SimplificationStats,
    ) -> Result<Option<Operands>, ConfigError> {
        let before = stats.rewrites;
        let out = children
            .iter()
            .map(|child| self.rewrite(child, stats))
            .collect::<Result<Operands, _>>()?;
        Ok((stats.rewrites != before).then_some(out))
    }
}

/// Statistics about the simplification process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplificationStats {
    /// Number of passes run.
    pub iterations: usize,
    /// Number of rule applications that changed the tree.
    pub rewrites: usize,
    /// Whether the last pass rewrote nothing.
    pub saturated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::OperationKind;
    use crate::pattern::{wc, Pattern};
    use crate::rules::Simplification;
    use termalg_core::{expr_order_key, Head};

    fn double_negation() -> ExprRule {
        // Neg(Neg(x)) -> x
        ExprRule::new(
            "double-negation",
            Pattern::with_head(
                Head::atom("Neg"),
                [Pattern::with_head(Head::atom("Neg"), [wc("x")])],
            ),
            |b| b.get("x").cloned().into(),
        )
    }

    fn neg(e: Expr) -> Expr {
        Expr::atom("Neg", [e])
    }

    #[test]
    fn test_simplify_nested() {
        let simplifier = Simplifier::new().with_rules(vec![double_negation()]);
        let x = Expr::symbol("x");
        let e = neg(neg(neg(neg(x.clone()))));
        let (result, stats) = simplifier.simplify_with_stats(&e).unwrap();
        assert_eq!(result, x);
        assert!(stats.saturated);
        assert_eq!(stats.rewrites, 2);
    }

    #[test]
    fn test_rewrites_inside_operations() {
        let sum = OperationKind::builder("Sum")
            .order_key(expr_order_key)
            .simplifications([Simplification::Flatten, Simplification::Reorder])
            .build()
            .unwrap();
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = sum.create([neg(neg(y.clone())), x.clone()]).unwrap();

        let simplifier = Simplifier::new().with_rules(vec![double_negation()]);
        assert_eq!(simplifier.simplify(&e).unwrap(), sum.create([x, y]).unwrap());
    }

    #[test]
    fn test_iter_limit() {
        let grow = ExprRule::new("grow", wc("x").head(Head::Integer).into(), |b| {
            Outcome::Applied(Expr::integer(b.integer("x").unwrap_or(0) + 1))
        });
        let simplifier =
            Simplifier::with_config(SimplifierConfig { iter_limit: 3 }).with_rules(vec![grow]);
        let (result, stats) = simplifier.simplify_with_stats(&Expr::integer(0)).unwrap();
        assert_eq!(result, Expr::integer(3));
        assert!(!stats.saturated);
    }
}
