// Header table shared by the CSV and Excel readers

use serde::Serialize;
use targetfind_matcher::Item;

use crate::error::IoError;

static EMPTY: Cell = Cell::Empty;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classify a raw text field. Surrounding whitespace is ignored;
    /// thousands separators are not numbers.
    pub fn parse(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        }
    }
}

/// A sheet read as one header row followed by data rows.
///
/// Rows may be ragged; missing trailing cells read as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 1-based spreadsheet row of the header (data starts one below).
    pub header_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
    Empty,
}

/// What `tfind columns` reports per header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub non_empty: usize,
    pub numbers: usize,
}

impl Table {
    /// Build a table from raw rows, the first of which is the header.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>, header_row: usize) -> Table {
        if rows.is_empty() {
            return Table {
                headers: Vec::new(),
                rows,
                header_row,
            };
        }
        let header = rows.remove(0);
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(header.len());
        let headers = (0..width)
            .map(|col| match header.get(col) {
                Some(Cell::Text(s)) => s.trim().to_string(),
                Some(Cell::Number(n)) => format!("{n}"),
                Some(Cell::Empty) | None => col_to_letter(col),
            })
            .collect();
        Table {
            headers,
            rows,
            header_row,
        }
    }

    fn cells(&self, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(col).unwrap_or(&EMPTY))
    }

    fn column_info(&self, col: usize) -> ColumnInfo {
        let mut non_empty = 0;
        let mut numbers = 0;
        for cell in self.cells(col) {
            match cell {
                Cell::Empty => {}
                Cell::Number(_) => {
                    non_empty += 1;
                    numbers += 1;
                }
                Cell::Text(_) => non_empty += 1,
            }
        }
        let kind = if non_empty == 0 {
            ColumnKind::Empty
        } else if numbers == non_empty {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        };
        ColumnInfo {
            name: self.headers[col].clone(),
            kind,
            non_empty,
            numbers,
        }
    }

    pub fn columns(&self) -> Vec<ColumnInfo> {
        (0..self.headers.len()).map(|c| self.column_info(c)).collect()
    }

    /// Resolve header names to column indices.
    ///
    /// An empty selection means every numeric column. Named columns must
    /// exist and be numeric; the first header wins when names repeat, and
    /// repeated names are resolved once.
    pub fn select(&self, names: &[String]) -> Result<Vec<usize>, IoError> {
        if names.is_empty() {
            let numeric: Vec<usize> = (0..self.headers.len())
                .filter(|&c| self.column_info(c).kind == ColumnKind::Numeric)
                .collect();
            if numeric.is_empty() {
                return Err(IoError::NoData);
            }
            return Ok(numeric);
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let col = self
                .headers
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| IoError::UnknownColumn {
                    name: name.clone(),
                    available: self.headers.clone(),
                })?;
            if self.column_info(col).kind != ColumnKind::Numeric {
                return Err(IoError::NonNumericColumn(self.headers[col].clone()));
            }
            // a column named twice still contributes each cell once
            if !selected.contains(&col) {
                selected.push(col);
            }
        }
        Ok(selected)
    }

    /// Items from `columns`, column by column, skipping empty cells.
    pub fn extract_items(&self, columns: &[usize]) -> Vec<Item> {
        let first_data_row = self.header_row + 1;
        let mut items = Vec::new();
        for &col in columns {
            let name = &self.headers[col];
            for (idx, cell) in self.cells(col).enumerate() {
                if let Cell::Number(value) = cell {
                    items.push(Item::new(*value, name.as_str(), first_data_row + idx));
                }
            }
        }
        items
    }

    /// Select then extract. Fails with `NoData` if nothing numeric remains.
    pub fn items(&self, names: &[String]) -> Result<Vec<Item>, IoError> {
        let columns = self.select(names)?;
        let items = self.extract_items(&columns);
        if items.is_empty() {
            return Err(IoError::NoData);
        }
        log::debug!("extracted {} items from {} columns", items.len(), columns.len());
        Ok(items)
    }
}

/// Convert column index to spreadsheet column letter (0 = A, 25 = Z, 26 = AA, etc.)
pub fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
