//! Pairwise rewriting.
//!
//! A binary rule pairs an arity-2 pattern with a replacement function. The
//! driver walks the operand sequence, rewriting a matching pair into a single
//! value and stepping back one position so the value is also tried against
//! its new left neighbour. Orderless kinds pair any two operands instead.
//! Every rewrite shortens the sequence, so the driver stops after at most
//! `n - 1` rewrites.

use std::fmt;
use std::sync::Arc;

use log::trace;
use termalg_core::{ConfigError, Expr, Operands};

use crate::kind::OperationKind;
use crate::outcome::Outcome;
use crate::pattern::{Bindings, Pattern};
use crate::rules::Simplified;

/// A replacement function over the bindings of a successful match.
///
/// Returning [`Outcome::NotApplicable`] declines the match; the driver then
/// tries the next rule on the same pair.
pub type Replacement = Arc<dyn Fn(&Bindings) -> Result<Outcome<Expr>, ConfigError> + Send + Sync>;

/// A pattern over two adjacent operands and its replacement.
#[derive(Clone)]
pub struct BinaryRule {
    pattern: Pattern,
    replacement: Replacement,
}

impl BinaryRule {
    /// Creates a rule with an infallible replacement.
    pub fn new(
        pattern: Pattern,
        f: impl Fn(&Bindings) -> Outcome<Expr> + Send + Sync + 'static,
    ) -> Self {
        Self::try_new(pattern, move |bindings| Ok(f(bindings)))
    }

    /// Creates a rule whose replacement may construct other kinds and fail.
    pub fn try_new(
        pattern: Pattern,
        f: impl Fn(&Bindings) -> Result<Outcome<Expr>, ConfigError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            pattern,
            replacement: Arc::new(f),
        }
    }

    /// Returns the pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Tries the rule on an ordered pair.
    ///
    /// # Errors
    ///
    /// Propagates errors from the replacement function.
    pub fn apply(&self, left: &Expr, right: &Expr) -> Result<Outcome<Expr>, ConfigError> {
        match self.pattern.match_tuple(&[left.clone(), right.clone()]) {
            Some(bindings) => (self.replacement)(&bindings),
            None => Ok(Outcome::NotApplicable),
        }
    }
}

impl fmt::Debug for BinaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryRule")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Runs the binary rules of `kind` over `operands` until no pair rewrites.
///
/// Orderless kinds (those with a reorder stage) try every pair, in both
/// orders; other kinds only try adjacent pairs, left to right. Replacements
/// equal to the neutral element are dropped, and if that consumes every
/// operand the construction collapses to the neutral element.
///
/// # Errors
///
/// Propagates errors from replacement functions.
pub fn match_replace_binary(
    kind: &OperationKind,
    operands: &[Expr],
) -> Result<Outcome<Simplified>, ConfigError> {
    if kind.binary_rules().is_empty() || operands.len() < 2 {
        return Ok(Outcome::NotApplicable);
    }

    let mut ops = operands.to_vec();
    let rewrites = if kind.is_orderless() {
        rewrite_any_pair(kind, &mut ops)?
    } else {
        rewrite_adjacent(kind, &mut ops)?
    };
    if rewrites == 0 {
        return Ok(Outcome::NotApplicable);
    }

    match kind.neutral_element() {
        Some(neutral) if ops.is_empty() => {
            Ok(Outcome::Applied(Simplified::Collapse(neutral.clone())))
        }
        _ => Ok(Outcome::Applied(Simplified::Operands(Operands::from_vec(ops)))),
    }
}

/// Returns the index and result of the first rule that rewrites the pair.
fn first_rewrite(
    rules: &[BinaryRule],
    left: &Expr,
    right: &Expr,
) -> Result<Option<(usize, Expr)>, ConfigError> {
    for (index, rule) in rules.iter().enumerate() {
        if let Outcome::Applied(replacement) = rule.apply(left, right)? {
            return Ok(Some((index, replacement)));
        }
    }
    Ok(None)
}

fn rewrite_adjacent(kind: &OperationKind, ops: &mut Vec<Expr>) -> Result<usize, ConfigError> {
    let neutral = kind.neutral_element();
    let mut rewrites = 0;
    let mut i = 0;
    while i + 1 < ops.len() {
        let Some((rule, replacement)) = first_rewrite(kind.binary_rules(), &ops[i], &ops[i + 1])?
        else {
            i += 1;
            continue;
        };
        trace!(
            "{}: rule {rule} rewrote {} · {} -> {replacement}",
            kind.name(),
            ops[i],
            ops[i + 1]
        );
        rewrites += 1;
        if neutral == Some(&replacement) {
            ops.drain(i..i + 2);
        } else {
            ops[i] = replacement;
            ops.remove(i + 1);
        }
        i = i.saturating_sub(1);
    }
    Ok(rewrites)
}

/// Rewrites any pair, in either order, until no pair matches.
///
/// Operands move one at a time into a settled list in which no pair
/// rewrites. An incoming value is tried against each settled operand; on a
/// match the partner leaves the list and the replacement becomes the
/// incoming value, taking the lower position. At most `2n - 1` values are
/// ever incoming, so the scan makes O(n²) pair tries.
fn rewrite_any_pair(kind: &OperationKind, ops: &mut Vec<Expr>) -> Result<usize, ConfigError> {
    let neutral = kind.neutral_element();
    let mut rewrites = 0;
    let mut settled: Vec<Expr> = Vec::with_capacity(ops.len());

    for op in std::mem::take(ops) {
        let mut slot = settled.len();
        let mut incoming = Some(op);
        while let Some(value) = incoming.take() {
            let Some((k, replacement)) = settled_partner(kind, &settled, &value)? else {
                settled.insert(slot.min(settled.len()), value);
                break;
            };
            rewrites += 1;
            settled.remove(k);
            slot = slot.min(k);
            if neutral != Some(&replacement) {
                incoming = Some(replacement);
            }
        }
    }

    *ops = settled;
    Ok(rewrites)
}

/// Finds the first settled operand that rewrites with `value`, trying the
/// settled operand on the left first.
fn settled_partner(
    kind: &OperationKind,
    settled: &[Expr],
    value: &Expr,
) -> Result<Option<(usize, Expr)>, ConfigError> {
    for (k, other) in settled.iter().enumerate() {
        let found = match first_rewrite(kind.binary_rules(), other, value)? {
            Some(hit) => Some(hit),
            None => first_rewrite(kind.binary_rules(), value, other)?,
        };
        if let Some((rule, replacement)) = found {
            trace!(
                "{}: rule {rule} rewrote {other} · {value} -> {replacement}",
                kind.name()
            );
            return Ok(Some((k, replacement)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{pattern_head, wc};
    use crate::rules::Simplification;
    use termalg_core::{expr_order_key, Head};

    fn concat_kind(neutral: Option<Expr>) -> Arc<OperationKind> {
        let concat = BinaryRule::new(
            pattern_head([wc("a").head(Head::Text), wc("b").head(Head::Text)]),
            |b| {
                let joined = format!("{}{}", b.text("a").unwrap_or(""), b.text("b").unwrap_or(""));
                Outcome::Applied(Expr::text(&joined))
            },
        );
        let mut builder = OperationKind::builder("Concat")
            .simplifications([Simplification::Flatten, Simplification::MatchReplaceBinary])
            .binary_rule(concat);
        if let Some(neutral) = neutral {
            builder = builder.neutral_element(neutral);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_rule_apply() {
        let kind = concat_kind(None);
        let rule = &kind.binary_rules()[0];
        assert_eq!(
            rule.apply(&Expr::text("a"), &Expr::text("b")),
            Ok(Outcome::Applied(Expr::text("ab")))
        );
        assert_eq!(
            rule.apply(&Expr::text("a"), &Expr::integer(1)),
            Ok(Outcome::NotApplicable)
        );
    }

    #[test]
    fn test_adjacent_rewrites_left_to_right() {
        let kind = concat_kind(None);
        let ops = [Expr::text("1"), Expr::text("2"), Expr::integer(0), Expr::text("3")];
        let result = match_replace_binary(&kind, &ops).unwrap();
        assert_eq!(
            result,
            Outcome::Applied(Simplified::Operands(
                [Expr::text("12"), Expr::integer(0), Expr::text("3")].into_iter().collect()
            ))
        );
    }

    #[test]
    fn test_neutral_results_are_dropped() {
        let kind = concat_kind(Some(Expr::text("")));
        let ops = [Expr::text(""), Expr::text("")];
        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(Simplified::Collapse(Expr::text("")))
        );
    }

    #[test]
    fn test_no_pair_matches() {
        let kind = concat_kind(None);
        let ops = [Expr::integer(1), Expr::text("x")];
        assert_eq!(match_replace_binary(&kind, &ops), Ok(Outcome::NotApplicable));
    }

    fn add_integers() -> BinaryRule {
        BinaryRule::new(
            pattern_head([wc("a").head(Head::Integer), wc("b").head(Head::Integer)]),
            |b| match (b.integer("a"), b.integer("b")) {
                (Some(a), Some(b)) => Outcome::Applied(Expr::integer(a + b)),
                _ => Outcome::NotApplicable,
            },
        )
    }

    fn plus_kind(rules: impl IntoIterator<Item = BinaryRule>) -> Arc<OperationKind> {
        let mut builder = OperationKind::builder("Plus")
            .order_key(expr_order_key)
            .neutral_element(Expr::integer(0))
            .simplifications([
                Simplification::Flatten,
                Simplification::Reorder,
                Simplification::MatchReplaceBinary,
            ]);
        for rule in rules {
            builder = builder.binary_rule(rule);
        }
        builder.build().unwrap()
    }

    fn operands(items: impl IntoIterator<Item = Expr>) -> Simplified {
        Simplified::Operands(items.into_iter().collect())
    }

    #[test]
    fn test_orderless_pairs_need_not_be_adjacent() {
        let kind = plus_kind([add_integers()]);
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let ops = [x.clone(), Expr::integer(1), y.clone(), Expr::integer(2)];

        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(operands([x.clone(), Expr::integer(3), y.clone()]))
        );
        assert_eq!(
            kind.create(ops).unwrap(),
            kind.create([Expr::integer(3), x, y]).unwrap()
        );
    }

    #[test]
    fn test_orderless_tries_both_orders() {
        // Only matches with the text on the left.
        let repeat = BinaryRule::new(
            pattern_head([wc("s").head(Head::Text), wc("n").head(Head::Integer)]),
            |b| match (b.text("s"), b.integer("n")) {
                (Some(s), Some(n)) if n > 0 => {
                    Outcome::Applied(Expr::text(&s.repeat(n as usize)))
                }
                _ => Outcome::NotApplicable,
            },
        );
        let kind = plus_kind([repeat]);
        let ops = [Expr::integer(2), Expr::text("ab")];
        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(operands([Expr::text("abab")]))
        );
    }

    #[test]
    fn test_orderless_drops_neutral_results() {
        let kind = plus_kind([add_integers()]);
        let x = Expr::symbol("x");
        let ops = [Expr::integer(2), x.clone(), Expr::integer(-2)];
        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(operands([x.clone()]))
        );
        assert_eq!(kind.create(ops).unwrap(), x);

        let cancel = [Expr::integer(5), Expr::integer(-5)];
        assert_eq!(
            match_replace_binary(&kind, &cancel).unwrap(),
            Outcome::Applied(Simplified::Collapse(Expr::integer(0)))
        );
    }

    #[test]
    fn test_orderless_replacement_meets_earlier_operands() {
        // 1 and 2 merge at the end of the scan; the sum must still meet 3.
        let kind = plus_kind([BinaryRule::new(
            pattern_head([wc("a").head(Head::Integer), wc("b").head(Head::Integer)]),
            |b| match (b.integer("a"), b.integer("b")) {
                (Some(a), Some(b)) if a + b == 3 || a + b == 6 => {
                    Outcome::Applied(Expr::integer(a + b))
                }
                _ => Outcome::NotApplicable,
            },
        )]);
        let ops = [Expr::integer(3), Expr::symbol("x"), Expr::integer(1), Expr::integer(2)];
        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(operands([Expr::integer(6), Expr::symbol("x")]))
        );
    }

    #[test]
    fn test_orderless_long_sum() {
        let kind = plus_kind([add_integers()]);
        let ops: Vec<Expr> = (1..=200).map(Expr::integer).collect();
        assert_eq!(
            match_replace_binary(&kind, &ops).unwrap(),
            Outcome::Applied(operands([Expr::integer(20100)]))
        );
    }
}
