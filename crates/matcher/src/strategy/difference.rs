use super::{scan_pairs, SearchContext};
use crate::error::SearchError;

/// First pair whose absolute difference is within tolerance of the target.
///
/// Zero values take part; nothing is divided.
pub fn find_difference(ctx: &mut SearchContext<'_>) -> Result<Option<Vec<usize>>, SearchError> {
    let handles: Vec<usize> = (0..ctx.items.len()).collect();
    let check = ctx.check;
    scan_pairs(ctx, &handles, "Checking difference combinations", |a, b| {
        check.accepts((a - b).abs())
    })
}

#[cfg(test)]
mod tests {
    use crate::config::Operation;
    use crate::strategy::test_support::run;

    #[test]
    fn order_of_pair_does_not_matter() {
        assert_eq!(run(Operation::Difference, &[12.0, 4.0], 8.0, 0.0), Some(vec![0, 1]));
        assert_eq!(run(Operation::Difference, &[4.0, 12.0], 8.0, 0.0), Some(vec![0, 1]));
    }

    #[test]
    fn canonical_pair_order() {
        // (0,2) comes before (1,2) in i<j enumeration.
        assert_eq!(run(Operation::Difference, &[1.0, 5.0, 4.0], 3.0, 0.0), Some(vec![0, 2]));
    }

    #[test]
    fn zero_values_allowed() {
        assert_eq!(run(Operation::Difference, &[0.0, 9.0], 9.0, 0.0), Some(vec![0, 1]));
    }

    #[test]
    fn absolute_tolerance() {
        assert_eq!(run(Operation::Difference, &[10.0, 3.0], 7.25, 0.25), Some(vec![0, 1]));
        assert_eq!(run(Operation::Difference, &[10.0, 3.0], 7.5, 0.25), None);
    }

    #[test]
    fn single_item_never_matches() {
        assert_eq!(run(Operation::Difference, &[5.0], 5.0, 10.0), None);
    }
}
