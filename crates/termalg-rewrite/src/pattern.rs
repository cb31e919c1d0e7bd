//! Wildcard patterns.
//!
//! Patterns are literals, wildcards or fixed-arity tuples of sub-patterns.
//! A tuple at the top level matches a tuple of candidates (such as the two
//! operands a binary rule looks at); a nested tuple matches the children of a
//! composite or the parameters of a domain atom, optionally constrained to a
//! head.
//!
//! Matching never fails loudly: a mismatch is `None`, which is distinct from
//! a successful match that bound nothing.
//!
//! # References
//!
//! - Pattern variables: Baader & Nipkow, "Term Rewriting and All That", Chapter 4 (1998)

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use termalg_core::{ConfigError, Expr, ExprNode, Head};

/// A predicate a bound value must satisfy.
pub type Condition = Arc<dyn Fn(&Expr) -> bool + Send + Sync>;

/// A named placeholder with head and predicate constraints.
#[derive(Clone)]
pub struct Wildcard {
    name: Arc<str>,
    /// Allowed heads; empty means any head.
    heads: SmallVec<[Head; 2]>,
    conditions: Vec<Condition>,
}

/// Creates an unconstrained wildcard named `name`.
#[must_use]
pub fn wc(name: &str) -> Wildcard {
    Wildcard::new(name)
}

impl Wildcard {
    /// Creates an unconstrained wildcard.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            heads: SmallVec::new(),
            conditions: Vec::new(),
        }
    }

    /// Allows values with `head`. May be called repeatedly.
    #[must_use]
    pub fn head(mut self, head: Head) -> Self {
        if !self.heads.contains(&head) {
            self.heads.push(head);
        }
        self
    }

    /// Appends a predicate.
    #[must_use]
    pub fn condition(mut self, f: impl Fn(&Expr) -> bool + Send + Sync + 'static) -> Self {
        self.conditions.push(Arc::new(f));
        self
    }

    /// Returns the wildcard name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the allowed heads.
    #[must_use]
    pub fn heads(&self) -> &[Head] {
        &self.heads
    }

    /// Returns true if `expr` satisfies the head constraint and every predicate.
    #[must_use]
    pub fn accepts(&self, expr: &Expr) -> bool {
        (self.heads.is_empty() || self.heads.contains(&expr.head()))
            && self.conditions.iter().all(|cond| cond(expr))
    }

    // Heads are deduplicated on insertion, so equal lengths plus containment
    // is set equality.
    fn same_declaration(&self, other: &Self) -> bool {
        self.heads.len() == other.heads.len()
            && self.heads.iter().all(|head| other.heads.contains(head))
            && self.conditions.len() == other.conditions.len()
            && self
                .conditions
                .iter()
                .zip(&other.conditions)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl fmt::Debug for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wildcard")
            .field("name", &self.name)
            .field("heads", &self.heads)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// Values bound by a successful match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings(HashMap<Arc<str>, Expr>);

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.0.get(name)
    }

    /// Returns the integer bound to `name`.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Expr::as_integer)
    }

    /// Returns the string bound to `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Expr::as_text)
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.0.iter().map(|(k, v)| (&**k, v))
    }

    /// Binds `name`, or checks consistency with an earlier binding.
    fn bind(&mut self, name: &Arc<str>, value: &Expr) -> bool {
        match self.0.get(name) {
            Some(bound) => bound == value,
            None => {
                self.0.insert(name.clone(), value.clone());
                true
            }
        }
    }
}

/// A pattern over expressions or tuples of expressions.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches a structurally equal value.
    Literal(Expr),
    /// Matches any value accepted by the wildcard and binds it.
    Wildcard(Wildcard),
    /// Matches a fixed number of positions element-wise.
    Head {
        /// Required head of a nested candidate; ignored for top-level tuples.
        head: Option<Head>,
        /// One sub-pattern per position.
        args: Vec<Pattern>,
    },
}

impl From<Wildcard> for Pattern {
    fn from(value: Wildcard) -> Self {
        Pattern::Wildcard(value)
    }
}

impl From<Expr> for Pattern {
    fn from(value: Expr) -> Self {
        Pattern::Literal(value)
    }
}

/// Builds a fixed-arity pattern from sub-patterns.
pub fn pattern_head<P: Into<Pattern>>(args: impl IntoIterator<Item = P>) -> Pattern {
    Pattern::Head {
        head: None,
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// Matches a single expression against a pattern.
#[must_use]
pub fn match_pattern(expr: &Expr, pattern: &Pattern) -> Option<Bindings> {
    pattern.match_expr(expr)
}

impl Pattern {
    /// Builds a fixed-arity pattern whose candidate must have `head`.
    pub fn with_head<P: Into<Pattern>>(head: Head, args: impl IntoIterator<Item = P>) -> Self {
        Pattern::Head {
            head: Some(head),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of positions of a tuple pattern.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        match self {
            Pattern::Head { args, .. } => Some(args.len()),
            _ => None,
        }
    }

    /// Matches a single expression.
    #[must_use]
    pub fn match_expr(&self, expr: &Expr) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        self.match_into(expr, &mut bindings).then_some(bindings)
    }

    /// Matches a tuple of candidates position by position.
    ///
    /// A non-tuple pattern matches a one-element tuple.
    #[must_use]
    pub fn match_tuple(&self, candidates: &[Expr]) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        let matched = match self {
            Pattern::Head { args, .. } => match_args(args, candidates, &mut bindings),
            _ => candidates.len() == 1 && self.match_into(&candidates[0], &mut bindings),
        };
        matched.then_some(bindings)
    }

    fn match_into(&self, expr: &Expr, bindings: &mut Bindings) -> bool {
        match self {
            Pattern::Literal(value) => value == expr,
            Pattern::Wildcard(w) => w.accepts(expr) && bindings.bind(&w.name, expr),
            Pattern::Head { head, args } => {
                // Only operations and domain atoms have positions to match.
                let positional = matches!(
                    expr.node(),
                    ExprNode::Atom { .. } | ExprNode::Operation { .. }
                );
                positional
                    && head.as_ref().map_or(true, |h| *h == expr.head())
                    && match_args(args, expr.children(), bindings)
            }
        }
    }

    /// Visits every wildcard in the pattern, depth first.
    pub fn wildcards(&self) -> Vec<&Wildcard> {
        let mut out = Vec::new();
        self.collect_wildcards(&mut out);
        out
    }

    fn collect_wildcards<'a>(&'a self, out: &mut Vec<&'a Wildcard>) {
        match self {
            Pattern::Literal(_) => {}
            Pattern::Wildcard(w) => out.push(w),
            Pattern::Head { args, .. } => {
                for arg in args {
                    arg.collect_wildcards(out);
                }
            }
        }
    }

    /// Returns every head the pattern refers to, including wildcard
    /// constraints and heads of literals.
    #[must_use]
    pub fn heads(&self) -> Vec<Head> {
        let mut out = Vec::new();
        self.collect_heads(&mut out);
        out
    }

    fn collect_heads(&self, out: &mut Vec<Head>) {
        match self {
            Pattern::Literal(value) => out.push(value.head()),
            Pattern::Wildcard(w) => out.extend(w.heads().iter().cloned()),
            Pattern::Head { head, args } => {
                out.extend(head.iter().cloned());
                for arg in args {
                    arg.collect_heads(out);
                }
            }
        }
    }

    /// Checks that repeated wildcard names share one declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InconsistentWildcard`] on a conflicting redeclaration.
    pub fn check_wildcards(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<&str, &Wildcard> = HashMap::new();
        for w in self.wildcards() {
            match seen.get(w.name()) {
                Some(first) if !first.same_declaration(w) => {
                    return Err(ConfigError::InconsistentWildcard {
                        name: w.name().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(w.name(), w);
                }
            }
        }
        Ok(())
    }
}

fn match_args(args: &[Pattern], candidates: &[Expr], bindings: &mut Bindings) -> bool {
    args.len() == candidates.len()
        && args
            .iter()
            .zip(candidates)
            .all(|(pattern, candidate)| pattern.match_into(candidate, bindings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_int() -> Wildcard {
        wc("a").head(Head::Integer)
    }

    fn b_str() -> Wildcard {
        wc("b").head(Head::Text)
    }

    #[test]
    fn test_wildcard_head_constraint() {
        let p: Pattern = a_int().into();
        let m = p.match_expr(&Expr::integer(5)).unwrap();
        assert_eq!(m.integer("a"), Some(5));
        assert!(p.match_expr(&Expr::text("5")).is_none());
    }

    #[test]
    fn test_wildcard_conditions() {
        let neg = wc("a").head(Head::Integer).condition(|e| e.as_integer().is_some_and(|n| n < 0));
        let p: Pattern = neg.into();
        assert!(p.match_expr(&Expr::integer(-1)).is_some());
        assert!(p.match_expr(&Expr::integer(1)).is_none());
    }

    #[test]
    fn test_wildcard_multiple_heads() {
        let w = wc("x").head(Head::Integer).head(Head::Symbol);
        assert!(w.accepts(&Expr::integer(1)));
        assert!(w.accepts(&Expr::symbol("y")));
        assert!(!w.accepts(&Expr::text("y")));
    }

    #[test]
    fn test_tuple_match() {
        let p = pattern_head([a_int(), b_str()]);
        assert_eq!(p.arity(), Some(2));

        let m = p.match_tuple(&[Expr::integer(2), Expr::text("x")]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.integer("a"), Some(2));
        assert_eq!(m.text("b"), Some("x"));

        assert!(p.match_tuple(&[Expr::text("x"), Expr::integer(2)]).is_none());
        assert!(p.match_tuple(&[Expr::integer(2)]).is_none());
    }

    #[test]
    fn test_empty_match_is_not_failure() {
        let p = pattern_head([Pattern::Literal(Expr::integer(1))]);
        let m = p.match_tuple(&[Expr::integer(1)]);
        assert_eq!(m, Some(Bindings::new()));
        assert!(p.match_tuple(&[Expr::integer(2)]).is_none());
    }

    #[test]
    fn test_repeated_name_requires_equal_values() {
        let p = pattern_head([wc("a"), wc("a")]);
        assert!(p.match_tuple(&[Expr::symbol("x"), Expr::symbol("x")]).is_some());
        assert!(p.match_tuple(&[Expr::symbol("x"), Expr::symbol("y")]).is_none());
    }

    #[test]
    fn test_nested_head_pattern() {
        let displace = Pattern::with_head(Head::atom("Displace"), [wc("alpha")]);
        let d = Expr::atom("Displace", [Expr::symbol("z")]);

        let m = displace.match_expr(&d).unwrap();
        assert_eq!(m.get("alpha"), Some(&Expr::symbol("z")));

        let squeeze = Expr::atom("Squeeze", [Expr::symbol("z")]);
        assert!(displace.match_expr(&squeeze).is_none());
        assert!(displace.match_expr(&Expr::symbol("z")).is_none());
    }

    #[test]
    fn test_check_wildcards() {
        let shared = a_int();
        let ok = pattern_head([shared.clone(), shared]);
        assert!(ok.check_wildcards().is_ok());

        let clash = pattern_head([a_int(), wc("a").head(Head::Text)]);
        assert_eq!(
            clash.check_wildcards(),
            Err(ConfigError::InconsistentWildcard { name: "a".into() })
        );
    }

    #[test]
    fn test_head_order_is_not_significant() {
        let p = pattern_head([
            wc("a").head(Head::Integer).head(Head::Symbol),
            wc("a").head(Head::Symbol).head(Head::Integer),
        ]);
        assert!(p.check_wildcards().is_ok());

        let narrower = pattern_head([
            wc("a").head(Head::Integer).head(Head::Symbol),
            wc("a").head(Head::Symbol),
        ]);
        assert!(narrower.check_wildcards().is_err());
    }

    #[test]
    fn test_heads() {
        let p = pattern_head([
            Pattern::from(wc("a").head(Head::atom("Displace"))),
            Pattern::with_head(Head::atom("Sigma"), [Expr::integer(0)]),
        ]);
        assert_eq!(
            p.heads(),
            vec![Head::atom("Displace"), Head::atom("Sigma"), Head::Integer]
        );
    }
}
