//! Mapping search solutions back to provenance-bearing items.

use crate::model::{Item, MatchResult};

/// Items at `handles` (indices into `store`), in handle order.
///
/// This is the path every strategy takes: solutions are carried as item
/// handles, so duplicate values at different cells keep their own
/// provenance.
pub fn resolve(store: &[Item], handles: &[usize]) -> Vec<Item> {
    handles.iter().map(|&h| store[h].clone()).collect()
}

/// Map bare values back to items by value equality.
///
/// Scans `store` once and consumes the first still-wanted occurrence of
/// each value, so repeated values pick up distinct items. Output is in
/// store order. Returns `None` if the store runs out before every value is
/// consumed.
///
/// When the same value appears at several positions, the item returned is
/// the earliest unconsumed one, which is not necessarily the one a search
/// examined. Use [`resolve`] when handles are available.
pub fn reconstruct(store: &[Item], values: &[f64]) -> Option<Vec<Item>> {
    let mut remaining: Vec<f64> = values.to_vec();
    let mut result = Vec::with_capacity(values.len());

    if remaining.is_empty() {
        return Some(result);
    }

    for item in store {
        if let Some(pos) = remaining.iter().position(|&v| v == item.value) {
            remaining.swap_remove(pos);
            result.push(item.clone());
            if remaining.is_empty() {
                return Some(result);
            }
        }
    }

    None
}

/// True if every item in `result` is backed by an item of `store`.
///
/// The result's values must reconstruct from the store, and each item must
/// equal some store item including its provenance.
pub fn is_backed_by(store: &[Item], result: &MatchResult) -> bool {
    reconstruct(store, &result.values()).is_some()
        && result
            .items
            .iter()
            .all(|item| store.iter().any(|s| s == item))
}
