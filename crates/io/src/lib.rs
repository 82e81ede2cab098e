// Spreadsheet ingestion: files -> header table -> search items

pub mod csv;
pub mod error;
pub mod table;
pub mod xlsx;

use std::path::Path;

pub use error::IoError;
pub use table::{Cell, ColumnInfo, ColumnKind, Table};

/// File formats the loader understands, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    Excel,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("csv") | Some("txt") => Ok(Format::Csv),
            Some("tsv") => Ok(Format::Tsv),
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("xlsb") | Some("ods") => {
                Ok(Format::Excel)
            }
            other => Err(IoError::UnsupportedFormat(
                other.unwrap_or("(none)").to_string(),
            )),
        }
    }
}

/// How to read a file. Defaults: sniff the delimiter, first sheet.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub sheet: Option<String>,
    pub delimiter: Option<u8>,
}

/// Read `path` into a header table.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table, IoError> {
    let format = Format::from_path(path)?;
    log::debug!("loading {} as {:?}", path.display(), format);

    let table = match format {
        Format::Csv => csv::import(path, options.delimiter)?,
        Format::Tsv => csv::import(path, Some(options.delimiter.unwrap_or(b'\t')))?,
        Format::Excel => xlsx::import(path, options.sheet.as_deref())?,
    };

    log::info!(
        "{}: {} columns, {} data rows",
        path.display(),
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.CSV")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("a.tsv")).unwrap(), Format::Tsv);
        assert_eq!(Format::from_path(Path::new("book.xlsm")).unwrap(), Format::Excel);
        assert_eq!(Format::from_path(Path::new("book.ods")).unwrap(), Format::Excel);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Format::from_path(Path::new("notes.pdf")).unwrap_err();
        assert_eq!(err, IoError::UnsupportedFormat("pdf".into()));
        let err = Format::from_path(Path::new("README")).unwrap_err();
        assert_eq!(err, IoError::UnsupportedFormat("(none)".into()));
    }
}
