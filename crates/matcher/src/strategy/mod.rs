//! Per-operation search strategies.
//!
//! Every strategy works on item handles (indices into the item store) and
//! returns the handles of the first combination that satisfies the target,
//! or `None`. Bookkeeping shared by all of them (node budget, progress,
//! cancellation) lives in [`SearchContext`].

mod difference;
mod product;
mod quotient;
mod sum;

pub use difference::find_difference;
pub use product::find_product;
pub use quotient::find_quotient;
pub use sum::find_subset_sum;

use crate::config::{Operation, SearchLimits};
use crate::error::SearchError;
use crate::model::Item;
use crate::progress::{CancelToken, ProgressSink, SCAN_PROGRESS_EVERY};
use crate::tolerance::Check;

/// State for one target's search.
pub struct SearchContext<'a> {
    pub items: &'a [Item],
    pub check: Check,
    pub limits: SearchLimits,
    progress: &'a dyn ProgressSink,
    cancel: &'a CancelToken,
    nodes_visited: u64,
    cap_hit: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        items: &'a [Item],
        check: Check,
        limits: SearchLimits,
        progress: &'a dyn ProgressSink,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            items,
            check,
            limits,
            progress,
            cancel,
            nodes_visited: 0,
            cap_hit: false,
        }
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    pub fn cap_hit(&self) -> bool {
        self.cap_hit
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), SearchError> {
        self.cancel.check()
    }

    pub(crate) fn report(&self, message: &str) {
        self.progress.report(message);
    }

    /// Count one candidate evaluation. Returns false once `max_nodes` is
    /// exhausted; the caller must stop searching.
    pub(crate) fn visit(&mut self) -> bool {
        if let Some(max) = self.limits.max_nodes {
            if self.nodes_visited >= max {
                self.cap_hit = true;
                return false;
            }
        }
        self.nodes_visited += 1;
        true
    }

    /// Throttled progress for pair and triplet scans.
    pub(crate) fn tick(&self, phase: &str) {
        if self.nodes_visited % SCAN_PROGRESS_EVERY == 0 {
            self.progress
                .report(&format!("{phase} ({} checked)", self.nodes_visited));
        }
    }
}

/// Run the strategy for `operation`.
pub fn dispatch(
    operation: Operation,
    ctx: &mut SearchContext<'_>,
) -> Result<Option<Vec<usize>>, SearchError> {
    match operation {
        Operation::Sum => find_subset_sum(ctx),
        Operation::Difference => find_difference(ctx),
        Operation::Product => find_product(ctx),
        Operation::Quotient => find_quotient(ctx),
    }
}

/// Handles of every non-zero item, in store order.
pub(crate) fn non_zero_handles(items: &[Item]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.value != 0.0)
        .map(|(h, _)| h)
        .collect()
}

/// Visit unordered pairs of `handles` (first position before second) until
/// `accept` holds for a pair of values.
pub(crate) fn scan_pairs(
    ctx: &mut SearchContext<'_>,
    handles: &[usize],
    phase: &str,
    accept: impl Fn(f64, f64) -> bool,
) -> Result<Option<Vec<usize>>, SearchError> {
    let items = ctx.items;
    for (pos, &i) in handles.iter().enumerate() {
        ctx.check_cancelled()?;
        let a = items[i].value;
        for &j in &handles[pos + 1..] {
            if !ctx.visit() {
                return Ok(None);
            }
            ctx.tick(phase);
            if accept(a, items[j].value) {
                return Ok(Some(vec![i, j]));
            }
        }
    }
    Ok(None)
}
