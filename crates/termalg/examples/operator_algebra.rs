//! Operator Algebra Examples
//!
//! Demonstrates canonical construction with a small quantum operator algebra:
//! Hilbert space products, operator products with pairwise rules, and
//! substitution that rebuilds products through their kind.
//!
//! Run with: RUST_LOG=debug cargo run --example operator_algebra

use std::sync::Arc;

use termalg::prelude::*;
use termalg::singleton;

singleton! {
    static II = "II";
}

singleton! {
    static TRIVIAL_SPACE = "TrivialSpace";
}

fn local_space(label: &str) -> Expr {
    Expr::atom("LocalSpace", [Expr::text(label)])
}

fn sigma(j: i64, k: i64, hs: &Expr) -> Expr {
    Expr::atom("LocalSigma", [Expr::integer(j), Expr::integer(k), hs.clone()])
}

fn displace(alpha: i64, hs: &Expr) -> Expr {
    Expr::atom("Displace", [Expr::integer(alpha), hs.clone()])
}

fn space_key(e: &Expr) -> Option<SortKey> {
    let label = e.atom_params("LocalSpace")?.first()?.as_text()?;
    Some(SortKey::Text(Arc::from(label)))
}

fn build_registry() -> Result<Registry, ConfigError> {
    let mut registry = Registry::new();
    for head in ["LocalSpace", "LocalSigma", "Displace"] {
        registry.declare_atom(head);
    }

    let product_space = OperationKind::builder("ProductSpace")
        .neutral_element(TRIVIAL_SPACE.clone())
        .order_key(space_key)
        .simplifications([
            Simplification::Flatten,
            Simplification::FilterNeutral,
            Simplification::Idempotent,
        ])
        .build()?;

    let int = |name: &str| wc(name).head(Head::Integer);
    let sigma_rule = BinaryRule::new(
        pattern_head([
            Pattern::with_head(Head::atom("LocalSigma"), [int("j"), int("k"), wc("hs")]),
            Pattern::with_head(Head::atom("LocalSigma"), [int("l"), int("m"), wc("hs")]),
        ]),
        |b| {
            let (Some(j), Some(k), Some(l), Some(m), Some(hs)) = (
                b.integer("j"),
                b.integer("k"),
                b.integer("l"),
                b.integer("m"),
                b.get("hs"),
            ) else {
                return Outcome::NotApplicable;
            };
            // Orthogonal projectors are left alone; there is no zero here.
            if k == l {
                Outcome::Applied(sigma(j, m, hs))
            } else {
                Outcome::NotApplicable
            }
        },
    );
    let displace_rule = BinaryRule::new(
        pattern_head([
            Pattern::with_head(Head::atom("Displace"), [int("a"), wc("hs")]),
            Pattern::with_head(Head::atom("Displace"), [int("b"), wc("hs")]),
        ]),
        |b| match (b.integer("a"), b.integer("b"), b.get("hs")) {
            (Some(a), Some(c), _) if a + c == 0 => Outcome::Applied(II.clone()),
            (Some(a), Some(c), Some(hs)) => Outcome::Applied(displace(a + c, hs)),
            _ => Outcome::NotApplicable,
        },
    );
    let operator_times = OperationKind::builder("OperatorTimes")
        .neutral_element(II.clone())
        .simplifications([
            Simplification::Flatten,
            Simplification::FilterNeutral,
            Simplification::MatchReplaceBinary,
        ])
        .binary_rules([sigma_rule, displace_rule])
        .build()?;

    registry.register(product_space)?;
    registry.register(operator_times)?;
    Ok(registry)
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║          termalg: Operator Algebra Examples                ║");
    println!("╚════════════════════════════════════════════════════════════╝\n");

    let registry = build_registry()?;
    let (h1, h2, h3) = (local_space("h1"), local_space("h2"), local_space("h3"));

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Example 1: Product Spaces");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    let h312 = registry.construct("ProductSpace", [h3.clone(), h1.clone(), h2.clone()])?;
    println!("  h3 * h1 * h2      = {h312}");
    let h11 = registry.construct("ProductSpace", [h1.clone(), h1.clone()])?;
    println!("  h1 * h1           = {h11}");
    let trivial = registry.construct("ProductSpace", [TRIVIAL_SPACE.clone(), h2.clone()])?;
    println!("  TrivialSpace * h2 = {trivial}\n");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Example 2: Operator Products");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    let hs = local_space("f");
    let ops = [
        sigma(0, 0, &hs),
        displace(-1, &hs),
        displace(1, &hs),
        sigma(0, 0, &hs),
    ];
    let rendered: Vec<String> = ops.iter().map(ToString::to_string).collect();
    let product = registry.construct("OperatorTimes", ops)?;
    println!("  {}", rendered.join(" · "));
    println!("    = {product}\n");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Example 3: Substitution");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    let mixed = registry.construct("OperatorTimes", [displace(2, &h1), displace(-2, &h2)])?;
    let mut subs = Substitution::new();
    subs.insert(h2.clone(), h1.clone());
    println!("  {mixed}");
    println!("    with h2 -> h1 = {}", mixed.substitute(&subs)?);
    println!(
        "  II is unchanged: {}",
        II.substitute(&subs)?.ptr_eq(&II)
    );

    Ok(())
}
