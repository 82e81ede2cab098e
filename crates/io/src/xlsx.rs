// Excel workbook import (xlsx, xlsm, xls, xlsb, ods)
//
// Reads one sheet's cached values. Formulas are not evaluated; a formula
// cell contributes whatever value the workbook last saved for it.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::error::IoError;
use crate::table::{Cell, Table};

/// Read `sheet` (or the first sheet) into a header table.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| IoError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IoError::MissingSheet {
                name: wanted.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IoError::Parse("workbook contains no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| IoError::Parse(format!("failed to read sheet '{}': {}", name, e)))?;

    let (height, width) = range.get_size();
    log::debug!("{}: sheet '{}' is {}x{}", path.display(), name, height, width);
    if height == 0 || width == 0 {
        return Ok(Table::from_rows(Vec::new(), 1));
    }

    // Range start offset (data may not begin at A1). Leading blank columns
    // are kept so header letters line up with the sheet.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let lead: Vec<Cell> = vec![Cell::Empty; start_col as usize];

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| {
            lead.iter()
                .cloned()
                .chain(row.iter().map(convert_cell))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(rows, start_row as usize + 1))
}

/// Map a calamine cell onto the three cell kinds.
///
/// Only genuine numbers count as numbers: text that looks numeric is
/// parsed the same way CSV fields are, while booleans, dates and error
/// values stay text.
fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::Float(n) if n.is_finite() => Cell::Number(*n),
        Data::Float(n) => Cell::Text(n.to_string()),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::String(s) => Cell::parse(s),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        Data::DateTime(dt) => Cell::Text(format!("{}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
