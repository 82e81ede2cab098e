use super::{non_zero_handles, scan_pairs, SearchContext};
use crate::error::SearchError;

/// First pair of non-zero items where either `a/b` or `b/a` is relatively
/// close to the target.
pub fn find_quotient(ctx: &mut SearchContext<'_>) -> Result<Option<Vec<usize>>, SearchError> {
    let handles = non_zero_handles(ctx.items);
    let check = ctx.check;
    scan_pairs(ctx, &handles, "Checking quotient pairs", |a, b| {
        check.accepts(a / b) || check.accepts(b / a)
    })
}

#[cfg(test)]
mod tests {
    use crate::config::Operation;
    use crate::strategy::test_support::run;

    #[test]
    fn either_direction_matches() {
        assert_eq!(run(Operation::Quotient, &[4.0, 12.0], 3.0, 0.01), Some(vec![0, 1]));
        assert_eq!(run(Operation::Quotient, &[12.0, 4.0], 3.0, 0.01), Some(vec![0, 1]));
        assert_eq!(run(Operation::Quotient, &[12.0, 4.0], 1.0 / 3.0, 0.0), Some(vec![0, 1]));
    }

    #[test]
    fn zeros_never_divide() {
        assert_eq!(run(Operation::Quotient, &[0.0, 5.0, 0.0, 10.0], 2.0, 0.0), Some(vec![1, 3]));
        assert_eq!(run(Operation::Quotient, &[0.0, 5.0], 0.0, 0.5), None);
    }

    #[test]
    fn relative_closeness() {
        // 10/3 = 3.333..; within 2% of 3.4 but not 1%.
        assert_eq!(run(Operation::Quotient, &[10.0, 3.0], 3.4, 0.02), Some(vec![0, 1]));
        assert_eq!(run(Operation::Quotient, &[10.0, 3.0], 3.4, 0.01), None);
    }

    #[test]
    fn negative_ratio() {
        assert_eq!(run(Operation::Quotient, &[-8.0, 2.0], -4.0, 0.0), Some(vec![0, 1]));
    }
}
