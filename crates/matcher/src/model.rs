use serde::Serialize;

use crate::config::Operation;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single numeric observation with the cell it came from.
///
/// `column` and `row` are provenance only: they are echoed back in results
/// and never take part in matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub value: f64,
    pub column: String,
    pub row: usize,
}

impl Item {
    pub fn new(value: f64, column: impl Into<String>, row: usize) -> Self {
        Self {
            value,
            column: column.into(),
            row,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Items whose combination lands on `target` within tolerance, in the order
/// the search discovered them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub target: f64,
    pub items: Vec<Item>,
}

impl MatchResult {
    pub fn values(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.value).collect()
    }

    /// The value the matched items produce under `operation`.
    ///
    /// Sum and product fold every value. A difference pair gives `|a - b|`
    /// and a quotient pair gives whichever of `a / b` and `b / a` lies
    /// closer to `target`, matching how the searches test a pair.
    pub fn combined(&self, operation: Operation) -> f64 {
        match (operation, self.values().as_slice()) {
            (Operation::Difference, &[a, b]) => (a - b).abs(),
            (Operation::Quotient, &[a, b]) => {
                let (ab, ba) = (a / b, b / a);
                if (ab - self.target).abs() <= (ba - self.target).abs() {
                    ab
                } else {
                    ba
                }
            }
            (_, values) => {
                let mut values = values.iter().copied();
                let Some(first) = values.next() else {
                    return 0.0;
                };
                values.fold(first, |acc, v| match operation {
                    Operation::Sum => acc + v,
                    Operation::Difference => acc - v,
                    Operation::Product => acc * v,
                    Operation::Quotient => acc / v,
                })
            }
        }
    }
}

/// Per-target search statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetOutcome {
    pub target: f64,
    pub matched: bool,
    pub nodes_visited: u64,
    pub cap_hit: bool,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub targets: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub capped: usize,
    pub nodes_visited: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMeta {
    pub operation: Operation,
    pub tolerance: f64,
    pub item_count: usize,
    pub target_count: usize,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    pub meta: SearchMeta,
    pub summary: SearchSummary,
    pub results: Vec<MatchResult>,
    pub outcomes: Vec<TargetOutcome>,
}

/// Compute summary statistics from per-target outcomes.
pub fn compute_summary(outcomes: &[TargetOutcome]) -> SearchSummary {
    let matched = outcomes.iter().filter(|o| o.matched).count();
    SearchSummary {
        targets: outcomes.len(),
        matched,
        unmatched: outcomes.len() - matched,
        capped: outcomes.iter().filter(|o| o.cap_hit).count(),
        nodes_visited: outcomes.iter().map(|o| o.nodes_visited).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(values: &[f64]) -> MatchResult {
        MatchResult {
            target: 0.0,
            items: values
                .iter()
                .enumerate()
                .map(|(i, v)| Item::new(*v, "A", i + 2))
                .collect(),
        }
    }

    #[test]
    fn combined_values() {
        assert_eq!(result(&[2.0, 3.0]).combined(Operation::Sum), 5.0);
        assert_eq!(result(&[12.0, 4.0]).combined(Operation::Difference), 8.0);
        assert_eq!(result(&[2.0, 3.0, 5.0]).combined(Operation::Product), 30.0);
        assert_eq!(result(&[]).combined(Operation::Sum), 0.0);
    }

    #[test]
    fn pairs_combine_in_the_direction_that_hit() {
        let mut diff = result(&[4.0, 12.0]);
        diff.target = 8.0;
        assert_eq!(diff.combined(Operation::Difference), 8.0);

        let mut quot = result(&[4.0, 12.0]);
        quot.target = 3.0;
        assert_eq!(quot.combined(Operation::Quotient), 3.0);
        quot.target = 0.3;
        assert!((quot.combined(Operation::Quotient) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn summary_counts_outcomes() {
        let outcomes = vec![
            TargetOutcome { target: 5.0, matched: true, nodes_visited: 4, cap_hit: false },
            TargetOutcome { target: 9.0, matched: false, nodes_visited: 10, cap_hit: true },
            TargetOutcome { target: 100.0, matched: false, nodes_visited: 7, cap_hit: false },
        ];
        let s = compute_summary(&outcomes);
        assert_eq!(s.targets, 3);
        assert_eq!(s.matched, 1);
        assert_eq!(s.unmatched, 2);
        assert_eq!(s.capped, 1);
        assert_eq!(s.nodes_visited, 21);
    }
}
