use std::collections::HashSet;

use ordered_float::OrderedFloat;

use super::SearchContext;
use crate::error::SearchError;
use crate::progress::{SCAN_PROGRESS_EVERY, SUM_PROGRESS_EVERY};

/// One achievable sum, stored as a link back to the entry it extends.
#[derive(Debug, Clone, Copy)]
struct SumEntry {
    sum: f64,
    /// Item added to the parent's subset. `None` only for the empty sum.
    item: Option<usize>,
    parent: usize,
    depth: usize,
}

/// Subset-sum search over every sum reachable from a prefix of the items.
///
/// Entries are kept in discovery order and the first subset found for a
/// sum owns it. Each item extends only the sums known before it was
/// reached, so an item is never used twice. Returns the first subset whose
/// sum is within tolerance, which is not necessarily the smallest one.
pub fn find_subset_sum(ctx: &mut SearchContext<'_>) -> Result<Option<Vec<usize>>, SearchError> {
    let items = ctx.items;
    let max_depth = ctx.limits.max_subset_size.unwrap_or(usize::MAX);

    let mut entries = vec![SumEntry {
        sum: 0.0,
        item: None,
        parent: 0,
        depth: 0,
    }];
    let mut seen: HashSet<OrderedFloat<f64>> = HashSet::new();
    seen.insert(OrderedFloat(0.0));

    for (handle, item) in items.iter().enumerate() {
        ctx.check_cancelled()?;
        if handle % SUM_PROGRESS_EVERY == 0 {
            ctx.report(&format!(
                "Checking sum combinations ({} of {} items, {} sums)",
                handle,
                items.len(),
                entries.len()
            ));
        }

        let known = entries.len();
        for index in 0..known {
            let entry = entries[index];
            if entry.depth >= max_depth {
                continue;
            }
            if !ctx.visit() {
                return Ok(None);
            }
            if ctx.nodes_visited() % SCAN_PROGRESS_EVERY == 0 {
                ctx.check_cancelled()?;
            }

            let new_sum = entry.sum + item.value;
            if ctx.check.accepts(new_sum) {
                let mut subset = collect_chain(&entries, index);
                subset.push(handle);
                return Ok(Some(subset));
            }
            if seen.insert(OrderedFloat(new_sum)) {
                entries.push(SumEntry {
                    sum: new_sum,
                    item: Some(handle),
                    parent: index,
                    depth: entry.depth + 1,
                });
            }
        }
    }

    Ok(None)
}

/// Handles of the subset behind `entries[index]`, in the order they were added.
fn collect_chain(entries: &[SumEntry], mut index: usize) -> Vec<usize> {
    let mut chain = Vec::with_capacity(entries[index].depth + 1);
    while let Some(item) = entries[index].item {
        chain.push(item);
        index = entries[index].parent;
    }
    chain.reverse();
    chain
}
