use std::fmt;

/// Everything that can go wrong between a file path and a list of items.
#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// File could not be opened or read.
    Unreadable { path: String, reason: String },
    /// Extension is not one of the supported formats.
    UnsupportedFormat(String),
    /// The file was read but its contents could not be parsed.
    Parse(String),
    /// `--sheet` named a sheet the workbook does not have.
    MissingSheet { name: String, available: Vec<String> },
    UnknownColumn { name: String, available: Vec<String> },
    NonNumericColumn(String),
    /// Nothing to search: no numeric columns or no numeric cells.
    NoData,
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, reason } => write!(f, "cannot read {path}: {reason}"),
            Self::UnsupportedFormat(ext) => write!(
                f,
                "unsupported file extension {ext:?} (expected csv, tsv, xlsx, xlsm, xls, xlsb or ods)"
            ),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::MissingSheet { name, available } => write!(
                f,
                "sheet '{name}' not found (available: {})",
                available.join(", ")
            ),
            Self::UnknownColumn { name, available } => write!(
                f,
                "column '{name}' not found (available: {})",
                available.join(", ")
            ),
            Self::NonNumericColumn(name) => {
                write!(f, "column '{name}' contains non-numeric values")
            }
            Self::NoData => write!(f, "no numeric data to search"),
        }
    }
}

impl std::error::Error for IoError {}
