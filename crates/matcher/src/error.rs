use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero limits, bad tolerance, etc.).
    ConfigValidation(String),
    /// The item store handed to the search was empty.
    EmptyItems,
    /// An item carries NaN or an infinity.
    NonFiniteValue { column: String, row: usize, value: f64 },
    /// A target is NaN or an infinity.
    NonFiniteTarget { index: usize, value: f64 },
    /// Tolerance is negative or not finite.
    InvalidTolerance(f64),
    /// The cancel token fired before the run finished.
    Cancelled,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::EmptyItems => write!(f, "no items to search"),
            Self::NonFiniteValue { column, row, value } => {
                write!(f, "column '{column}', row {row}: value {value} is not finite")
            }
            Self::NonFiniteTarget { index, value } => {
                write!(f, "target #{}: {value} is not finite", index + 1)
            }
            Self::InvalidTolerance(value) => {
                write!(f, "tolerance must be a finite non-negative number, got {value}")
            }
            Self::Cancelled => write!(f, "search cancelled"),
        }
    }
}

impl std::error::Error for SearchError {}
