//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `tfind` exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | At least one target matched (or command succeeded)   |
//! | 1    | Search ran, no target matched                        |
//! | 2    | Usage error (bad args, unknown column or sheet)      |
//! | 3    | Input file or config could not be read               |
//! | 4    | Input file or config could not be parsed             |
//! | 5    | Invalid search input (no numeric data, bad values)   |
//! | 6    | Search cancelled (`--timeout-secs` elapsed)          |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with the next free number
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use targetfind_io::IoError;
use targetfind_matcher::SearchError;

/// Success - command completed; for `search`, something matched.
pub const EXIT_SUCCESS: u8 = 0;

/// Search completed without matching any target.
/// Like `grep(1)`, exit 1 means "nothing found", not failure.
pub const EXIT_NO_MATCH: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File could not be opened or read.
pub const EXIT_READ: u8 = 3;

/// File was read but could not be parsed (CSV, workbook or TOML).
pub const EXIT_PARSE: u8 = 4;

/// Inputs parsed but cannot be searched.
pub const EXIT_INVALID_INPUT: u8 = 5;

/// Search stopped by cancellation.
pub const EXIT_CANCELLED: u8 = 6;

/// Map an ingestion error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Unreadable { .. } => EXIT_READ,
        IoError::Parse(_) => EXIT_PARSE,
        IoError::UnsupportedFormat(_)
        | IoError::MissingSheet { .. }
        | IoError::UnknownColumn { .. } => EXIT_USAGE,
        IoError::NonNumericColumn(_) | IoError::NoData => EXIT_INVALID_INPUT,
    }
}

/// Map an engine error to its exit code.
pub fn search_exit_code(err: &SearchError) -> u8 {
    match err {
        SearchError::ConfigParse(_) => EXIT_PARSE,
        SearchError::Cancelled => EXIT_CANCELLED,
        SearchError::ConfigValidation(_)
        | SearchError::EmptyItems
        | SearchError::NonFiniteValue { .. }
        | SearchError::NonFiniteTarget { .. }
        | SearchError::InvalidTolerance(_) => EXIT_INVALID_INPUT,
    }
}
