// Property-based tests for the four search strategies.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use targetfind_matcher::config::{Operation, SearchConfig};
use targetfind_matcher::model::{Item, MatchResult};
use targetfind_matcher::reconstruct::reconstruct;
use targetfind_matcher::tolerance::is_close;
use targetfind_matcher::{run, search, CancelToken, NoProgress};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Small integer-valued cells so sums and products stay exact.
fn arb_items(max_len: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(0.0f64),
            6 => (-20i32..=20).prop_map(f64::from),
        ],
        1..max_len,
    )
    .prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Item::new(v, if i % 2 == 0 { "A" } else { "B" }, i + 2))
            .collect()
    })
}

fn arb_targets() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-60i32..=60).prop_map(f64::from), 1..5)
}

fn arb_tolerance() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => Just(0.0),
        1 => 0.0..0.5f64,
    ]
}

/// Every returned item must be one of the store's items.
fn assert_drawn_from(store: &[Item], result: &MatchResult) {
    for item in &result.items {
        assert!(store.contains(item), "fabricated item {item:?}");
    }
    let mut rows: Vec<(&str, usize)> =
        result.items.iter().map(|i| (i.column.as_str(), i.row)).collect();
    rows.sort();
    rows.dedup();
    assert_eq!(rows.len(), result.items.len(), "item used twice: {:?}", result.items);
    assert!(reconstruct(store, &result.values()).is_some());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn sum_results_within_tolerance(
        store in arb_items(10),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        let results = search(&store, &targets, Operation::Sum, tol, None).unwrap();
        for r in &results {
            prop_assert!(!r.items.is_empty());
            let total: f64 = r.items.iter().map(|i| i.value).sum();
            prop_assert!((total - r.target).abs() <= tol + 1e-9);
            assert_drawn_from(&store, r);
        }
    }

    #[test]
    fn difference_results_are_pairs(
        store in arb_items(12),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        let results = search(&store, &targets, Operation::Difference, tol, None).unwrap();
        for r in &results {
            prop_assert_eq!(r.items.len(), 2);
            let d = (r.items[0].value - r.items[1].value).abs();
            prop_assert!((d - r.target).abs() <= tol);
            assert_drawn_from(&store, r);
        }
    }

    #[test]
    fn product_results_are_pairs_or_triplets(
        store in arb_items(10),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        let results = search(&store, &targets, Operation::Product, tol, None).unwrap();
        for r in &results {
            prop_assert!(r.items.len() == 2 || r.items.len() == 3);
            prop_assert!(r.items.iter().all(|i| i.value != 0.0));
            let p: f64 = r.items.iter().map(|i| i.value).product();
            prop_assert!((p - r.target).abs() <= tol * r.target);
            assert_drawn_from(&store, r);
        }
    }

    #[test]
    fn quotient_results_never_divide_by_zero(
        store in arb_items(12),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        let results = search(&store, &targets, Operation::Quotient, tol, None).unwrap();
        for r in &results {
            prop_assert_eq!(r.items.len(), 2);
            let (a, b) = (r.items[0].value, r.items[1].value);
            prop_assert!(a != 0.0 && b != 0.0);
            prop_assert!(is_close(a / b, r.target, tol) || is_close(b / a, r.target, tol));
            assert_drawn_from(&store, r);
        }
    }

    #[test]
    fn results_follow_target_order(
        store in arb_items(8),
        targets in arb_targets(),
    ) {
        for op in Operation::ALL {
            let results = search(&store, &targets, op, 0.0, None).unwrap();
            let mut next = 0;
            for r in &results {
                let pos = targets[next..].iter().position(|t| *t == r.target);
                prop_assert!(pos.is_some(), "result target {} out of order", r.target);
                next += pos.unwrap_or(0) + 1;
            }
        }
    }

    #[test]
    fn search_is_deterministic(
        store in arb_items(10),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        for op in Operation::ALL {
            let first = search(&store, &targets, op, tol, None).unwrap();
            let second = search(&store, &targets, op, tol, None).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn parallel_is_identical_to_sequential(
        store in arb_items(10),
        targets in arb_targets(),
        tol in arb_tolerance(),
    ) {
        for op in Operation::ALL {
            let mut config = SearchConfig::new(op, tol);
            let cancel = CancelToken::new();
            let sequential = run(&store, &targets, &config, &NoProgress, &cancel).unwrap();
            config.parallel = true;
            let parallel = run(&store, &targets, &config, &NoProgress, &cancel).unwrap();
            prop_assert_eq!(sequential.results, parallel.results);
        }
    }
}

// ---------------------------------------------------------------------------
// Adversarial fixtures
// ---------------------------------------------------------------------------

#[test]
fn unreachable_targets_never_match() {
    let store: Vec<Item> = (1..=8).map(|i| Item::new(i as f64 * 10.0, "A", i + 1)).collect();
    // Every combination of multiples of ten stays a multiple of ten (or a
    // ratio of them); 3.7 and its inverse are out of reach.
    for op in Operation::ALL {
        let results = search(&store, &[3.7, -1_000_000.0], op, 0.0, None).unwrap();
        assert!(results.is_empty(), "{op}: {results:?}");
    }
}
