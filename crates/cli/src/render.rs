// Human-readable output for search results and column listings

use std::fmt::Write as _;
use std::time::Duration;

use targetfind_io::{ColumnInfo, ColumnKind};
use targetfind_matcher::model::{Item, MatchResult, SearchOutput};
use targetfind_matcher::Operation;

use crate::util::{display_width, format_number, pad_right};

const MAX_COLUMN_WIDTH: usize = 40;

/// One-line equation for a match, e.g. `2 + 3 = 5` or `12 ÷ 4 = 3`.
///
/// Difference and quotient pairs are ordered so the printed equation is
/// the one that hit the target.
pub(crate) fn formula(result: &MatchResult, operation: Operation) -> String {
    let value = result.combined(operation);
    let values = result.values();
    let ordered = match (operation, values.as_slice()) {
        (Operation::Difference, &[a, b]) if b > a => vec![b, a],
        (Operation::Quotient, &[a, b]) if a / b != value => vec![b, a],
        _ => values.clone(),
    };

    let terms: Vec<String> = ordered.iter().map(|v| format_number(*v)).collect();
    format!(
        "{} = {}",
        terms.join(&format!(" {} ", operation.symbol())),
        format_number(value)
    )
}

/// Value/Column/Row table, indented two spaces.
fn item_table(items: &[Item]) -> String {
    let rows: Vec<[String; 3]> = items
        .iter()
        .map(|i| [format_number(i.value), i.column.clone(), i.row.to_string()])
        .collect();
    let headers = ["Value", "Column", "Row"];

    let mut widths = headers.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell)).min(MAX_COLUMN_WIDTH);
        }
    }

    let mut out = String::new();
    let line = |cells: [&str; 3]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| pad_right(c, w))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };
    out.push_str(&line(headers));
    let rule = widths.map(|w| "-".repeat(w));
    out.push_str(&line([rule[0].as_str(), rule[1].as_str(), rule[2].as_str()]));
    for row in &rows {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out
}

/// Full report: one block per matched target, then a summary line.
pub(crate) fn report(output: &SearchOutput, elapsed: Duration) -> String {
    let operation = output.meta.operation;
    let mut out = String::new();

    for result in &output.results {
        let _ = writeln!(out, "Target {}", format_number(result.target));
        let _ = writeln!(out, "  {}", formula(result, operation));
        out.push('\n');
        out.push_str(&item_table(&result.items));
        out.push('\n');
    }

    let secs = elapsed.as_secs_f64();
    if output.results.is_empty() {
        let _ = writeln!(
            out,
            "No matches found ({} target(s) searched in {:.2}s)",
            output.summary.targets, secs
        );
    } else {
        let _ = writeln!(
            out,
            "Found {} match(es) for {} target(s) in {:.2}s",
            output.summary.matched, output.summary.targets, secs
        );
    }
    out
}

/// `tfind columns` listing.
pub(crate) fn columns(infos: &[ColumnInfo]) -> String {
    let name_width = infos
        .iter()
        .map(|c| display_width(&c.name))
        .max()
        .unwrap_or(0)
        .clamp(6, MAX_COLUMN_WIDTH);

    let mut out = format!("{}  {:<8}  {}\n", pad_right("Column", name_width), "Type", "Non-empty");
    for info in infos {
        let kind = match info.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        };
        let _ = writeln!(
            out,
            "{}  {:<8}  {}",
            pad_right(&info.name, name_width),
            kind,
            info.non_empty
        );
    }
    out
}
