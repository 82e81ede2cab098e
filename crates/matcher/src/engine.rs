use rayon::prelude::*;

use crate::config::{Operation, SearchConfig};
use crate::error::SearchError;
use crate::model::{compute_summary, Item, MatchResult, SearchMeta, SearchOutput, TargetOutcome};
use crate::progress::{CancelToken, NoProgress, ProgressSink};
use crate::reconstruct::{is_backed_by, resolve};
use crate::strategy::{dispatch, SearchContext};
use crate::tolerance::Check;

/// Search every target with one operation and tolerance.
///
/// Returns one entry per matched target, in target order. Unmatched
/// targets are left out.
pub fn search(
    items: &[Item],
    targets: &[f64],
    operation: Operation,
    tolerance: f64,
    progress: Option<&dyn ProgressSink>,
) -> Result<Vec<MatchResult>, SearchError> {
    let config = SearchConfig::new(operation, tolerance);
    let progress = progress.unwrap_or(&NoProgress);
    let output = run(items, targets, &config, progress, &CancelToken::new())?;
    Ok(output.results)
}

/// Run a search per config. Returns matches + per-target statistics.
///
/// `config.targets` is ignored; callers pass the targets they want searched.
pub fn run(
    items: &[Item],
    targets: &[f64],
    config: &SearchConfig,
    progress: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<SearchOutput, SearchError> {
    config.validate()?;
    validate_input(items, targets)?;

    log::debug!(
        "{} search over {} items for {} targets (tolerance {}, parallel {})",
        config.operation,
        items.len(),
        targets.len(),
        config.tolerance,
        config.parallel
    );

    let total = targets.len();
    let searched: Vec<(TargetOutcome, Option<MatchResult>)> = if config.parallel {
        targets
            .par_iter()
            .enumerate()
            .map(|(index, &target)| search_target(items, index, total, target, config, progress, cancel))
            .collect::<Result<_, _>>()?
    } else {
        targets
            .iter()
            .enumerate()
            .map(|(index, &target)| search_target(items, index, total, target, config, progress, cancel))
            .collect::<Result<_, _>>()?
    };

    let mut outcomes = Vec::with_capacity(searched.len());
    let mut results = Vec::new();
    for (outcome, result) in searched {
        outcomes.push(outcome);
        results.extend(result);
    }

    let summary = compute_summary(&outcomes);
    log::info!(
        "{} search: {}/{} targets matched, {} candidates checked",
        config.operation,
        summary.matched,
        summary.targets,
        summary.nodes_visited
    );

    Ok(SearchOutput {
        meta: SearchMeta {
            operation: config.operation,
            tolerance: config.tolerance,
            item_count: items.len(),
            target_count: total,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        results,
        outcomes,
    })
}

fn search_target(
    items: &[Item],
    index: usize,
    total: usize,
    target: f64,
    config: &SearchConfig,
    progress: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<(TargetOutcome, Option<MatchResult>), SearchError> {
    cancel.check()?;
    progress.report(&format!("Searching for {target} ({}/{total})", index + 1));

    let check = Check::new(config.operation.tolerance_rule(), target, config.tolerance);
    let mut ctx = SearchContext::new(items, check, config.limits(), progress, cancel);
    let found = dispatch(config.operation, &mut ctx)?;

    if ctx.cap_hit() {
        log::warn!(
            "target {target}: search stopped after {} candidates (max_nodes)",
            ctx.nodes_visited()
        );
    } else {
        log::debug!(
            "target {target}: {} after {} candidates",
            if found.is_some() { "matched" } else { "no match" },
            ctx.nodes_visited()
        );
    }

    let result = found.map(|handles| MatchResult {
        target,
        items: resolve(items, &handles),
    });
    debug_assert!(result.as_ref().map_or(true, |r| is_backed_by(items, r)));

    let outcome = TargetOutcome {
        target,
        matched: result.is_some(),
        nodes_visited: ctx.nodes_visited(),
        cap_hit: ctx.cap_hit(),
    };
    Ok((outcome, result))
}

/// Reject inputs that would make results meaningless.
fn validate_input(items: &[Item], targets: &[f64]) -> Result<(), SearchError> {
    if items.is_empty() {
        return Err(SearchError::EmptyItems);
    }
    if let Some(item) = items.iter().find(|i| !i.value.is_finite()) {
        return Err(SearchError::NonFiniteValue {
            column: item.column.clone(),
            row: item.row,
            value: item.value,
        });
    }
    for (index, &value) in targets.iter().enumerate() {
        if !value.is_finite() {
            return Err(SearchError::NonFiniteTarget { index, value });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
