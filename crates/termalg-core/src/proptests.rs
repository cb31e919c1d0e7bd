//! Property-based tests for the canonical ordering.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use crate::ordering::{compare_expr, sort_key};
    use crate::Expr;

    // Strategy for generating small expression trees
    fn expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            (-50i64..50).prop_map(Expr::integer),
            "[a-c]{1,2}".prop_map(|s| Expr::text(&s)),
            "[x-z]".prop_map(|s| Expr::symbol(&s)),
            Just(Expr::singleton("II")),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            (prop_oneof![Just("A"), Just("B")], prop::collection::vec(inner, 0..3))
                .prop_map(|(head, params)| Expr::atom(head, params))
        })
    }

    proptest! {
        #[test]
        fn compare_matches_sort_key(a in expr(), b in expr()) {
            prop_assert_eq!(compare_expr(&a, &b), sort_key(&a).cmp(&sort_key(&b)));
        }

        #[test]
        fn compare_is_antisymmetric(a in expr(), b in expr()) {
            prop_assert_eq!(compare_expr(&a, &b), compare_expr(&b, &a).reverse());
        }

        #[test]
        fn equal_iff_structurally_equal(a in expr(), b in expr()) {
            prop_assert_eq!(compare_expr(&a, &b) == Ordering::Equal, a == b);
        }
    }
}
