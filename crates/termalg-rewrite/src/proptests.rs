//! Property-based tests for the construction pipeline.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use termalg_core::{compare_expr, expr_order_key, Expr};

    use crate::kind::OperationKind;
    use crate::rules::Simplification;

    fn orderless() -> Arc<OperationKind> {
        OperationKind::builder("Orderless")
            .order_key(expr_order_key)
            .simplifications([Simplification::Flatten, Simplification::Reorder])
            .build()
            .unwrap()
    }

    fn flat() -> Arc<OperationKind> {
        OperationKind::builder("Flat")
            .simplification(Simplification::Flatten)
            .build()
            .unwrap()
    }

    fn idem() -> Arc<OperationKind> {
        OperationKind::builder("Idem")
            .order_key(expr_order_key)
            .simplifications([Simplification::Flatten, Simplification::Idempotent])
            .build()
            .unwrap()
    }

    fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            (-20i64..20).prop_map(Expr::integer),
            "[a-c]".prop_map(|s| Expr::text(&s)),
            "[x-z]".prop_map(|s| Expr::symbol(&s)),
        ]
    }

    proptest! {
        #[test]
        fn reorder_ignores_permutation(
            (ops, shuffled) in prop::collection::vec(leaf(), 2..8)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let kind = orderless();
            prop_assert_eq!(kind.create(ops).unwrap(), kind.create(shuffled).unwrap());
        }

        #[test]
        fn reorder_yields_sorted_operands(ops in prop::collection::vec(leaf(), 2..8)) {
            let e = orderless().create(ops).unwrap();
            let children = e.children();
            prop_assert!(children
                .windows(2)
                .all(|w| compare_expr(&w[0], &w[1]).is_le()));
        }

        #[test]
        fn flatten_splits_anywhere(
            ops in prop::collection::vec(leaf(), 3..8),
            cut in 1usize..3,
        ) {
            let kind = flat();
            let (head, tail) = ops.split_at(cut);
            let nested = kind.create(tail.iter().cloned()).unwrap();
            let mut spliced = head.to_vec();
            spliced.push(nested);
            prop_assert_eq!(kind.create(spliced).unwrap(), kind.create(ops).unwrap());
        }

        #[test]
        fn idempotent_operands_are_unique(ops in prop::collection::vec(leaf(), 2..10)) {
            let e = idem().create(ops.clone()).unwrap();
            let children: Vec<Expr> = if e.is_operation_of("Idem") {
                e.children().to_vec()
            } else {
                vec![e]
            };
            for (i, a) in children.iter().enumerate() {
                prop_assert!(ops.contains(a));
                prop_assert!(children[i + 1..].iter().all(|b| b != a));
            }
            for op in &ops {
                prop_assert!(children.contains(op));
            }
        }
    }
}
