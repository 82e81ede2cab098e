use super::{non_zero_handles, scan_pairs, SearchContext};
use crate::error::SearchError;

/// First pair, then first triplet, of non-zero items whose product is
/// within `tolerance * target` of the target.
///
/// Triplets are only tried once the pair scan ran to completion, so a pair
/// answer always wins over a triplet answer.
pub fn find_product(ctx: &mut SearchContext<'_>) -> Result<Option<Vec<usize>>, SearchError> {
    let handles = non_zero_handles(ctx.items);
    let check = ctx.check;

    if let Some(found) = scan_pairs(ctx, &handles, "Checking product pairs", |a, b| {
        check.accepts(a * b)
    })? {
        return Ok(Some(found));
    }
    if ctx.cap_hit() {
        return Ok(None);
    }

    scan_triplets(ctx, &handles)
}

fn scan_triplets(
    ctx: &mut SearchContext<'_>,
    handles: &[usize],
) -> Result<Option<Vec<usize>>, SearchError> {
    let items = ctx.items;
    let n = handles.len();
    for p in 0..n {
        ctx.check_cancelled()?;
        let a = items[handles[p]].value;
        for q in p + 1..n {
            let ab = a * items[handles[q]].value;
            for r in q + 1..n {
                if !ctx.visit() {
                    return Ok(None);
                }
                ctx.tick("Checking product triplets");
                if ctx.check.accepts(ab * items[handles[r]].value) {
                    return Ok(Some(vec![handles[p], handles[q], handles[r]]));
                }
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use crate::config::{Operation, SearchLimits};
    use crate::strategy::test_support::{run, run_with};

    #[test]
    fn pair_found() {
        assert_eq!(run(Operation::Product, &[3.0, 4.0, 5.0], 20.0, 0.0), Some(vec![1, 2]));
    }

    #[test]
    fn triplet_when_no_pair() {
        assert_eq!(run(Operation::Product, &[2.0, 3.0, 5.0], 30.0, 0.0), Some(vec![0, 1, 2]));
    }

    #[test]
    fn pair_preferred_over_earlier_triplet() {
        // 1*2*3 = 6 is an earlier triplet, but the pair 6*1 wins.
        assert_eq!(run(Operation::Product, &[1.0, 2.0, 3.0, 6.0], 6.0, 0.0), Some(vec![0, 3]));
    }

    #[test]
    fn zeros_are_excluded() {
        // 0*x is never a candidate, handles skip the zero.
        assert_eq!(run(Operation::Product, &[0.0, 4.0, 0.0, 2.0], 8.0, 0.0), Some(vec![1, 3]));
        assert_eq!(run(Operation::Product, &[0.0, 4.0, 7.0], 0.0, 0.5), None);
    }

    #[test]
    fn relative_tolerance() {
        // 30 vs 31: 1 <= 0.05 * 31
        assert_eq!(run(Operation::Product, &[5.0, 6.0], 31.0, 0.05), Some(vec![0, 1]));
        assert_eq!(run(Operation::Product, &[5.0, 6.0], 35.0, 0.05), None);
    }

    #[test]
    fn unreachable_target() {
        assert_eq!(run(Operation::Product, &[2.0, 3.0, 5.0], 100.0, 0.1), None);
    }

    #[test]
    fn capped_pair_scan_skips_triplets() {
        let limits = SearchLimits { max_subset_size: None, max_nodes: Some(2) };
        let (found, visited, cap_hit) =
            run_with(Operation::Product, &[2.0, 3.0, 5.0], 30.0, 0.0, limits);
        assert_eq!(found, None);
        assert_eq!(visited, 2);
        assert!(cap_hit);
    }
}
