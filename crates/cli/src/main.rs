// tfind - find spreadsheet cells whose sum, difference, product or quotient hits a target

mod exit_codes;
mod render;
mod search;
mod util;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use targetfind_io::{IoError, LoadOptions};
use targetfind_matcher::{SearchConfig, SearchError};

use exit_codes::{io_exit_code, search_exit_code, EXIT_PARSE, EXIT_READ, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tfind")]
#[command(about = "Find the cells whose sum, difference, product or quotient matches a target")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a CSV or Excel file for values that combine into each target
    #[command(after_help = "\
Examples:
  tfind search ledger.csv --targets 1250.40
  tfind search ledger.csv -t 100,250 --op product --tolerance-pct 1
  tfind search book.xlsx --sheet Q3 --columns Debit,Credit -t 99.5 --tolerance 0.5
  tfind search ledger.csv -t 42 --op difference --json -o result.json")]
    Search(search::SearchArgs),

    /// List the columns of a file with their detected type
    Columns {
        /// CSV, TSV or Excel file
        file: PathBuf,

        /// Sheet name for workbooks (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Field delimiter for CSV (default: sniffed)
        #[arg(long)]
        delimiter: Option<char>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a search config file
    Validate {
        /// TOML config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nmatcher: targetfind-matcher ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Search(args) => search::cmd_search(args),
        Commands::Columns {
            file,
            sheet,
            delimiter,
            json,
        } => cmd_columns(file, sheet, delimiter, json),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_READ, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Exit with `code` and nothing on stderr.
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        let hint = match &err {
            IoError::UnknownColumn { .. } | IoError::NonNumericColumn(_) => {
                Some("run `tfind columns <FILE>` to see column names and types".to_string())
            }
            IoError::UnsupportedFormat(_) => {
                Some("save the sheet as .csv or .xlsx".to_string())
            }
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<SearchError> for CliError {
    fn from(err: SearchError) -> Self {
        let hint = match &err {
            SearchError::Cancelled => Some("raise --timeout-secs or set --max-nodes".to_string()),
            _ => None,
        };
        Self { code: search_exit_code(&err), message: err.to_string(), hint }
    }
}

/// `--delimiter` must be a single ASCII character.
pub(crate) fn delimiter_byte(delimiter: Option<char>) -> Result<Option<u8>, CliError> {
    match delimiter {
        None => Ok(None),
        Some(c) if c.is_ascii() => Ok(Some(c as u8)),
        Some(c) => Err(CliError::args(format!("delimiter must be an ASCII character, got {c:?}"))),
    }
}

/// Read and validate a TOML search config.
pub(crate) fn load_config(path: &Path) -> Result<SearchConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
    let config = SearchConfig::from_toml(&text).map_err(|e| {
        CliError::from(e).with_hint(format!("fix {} and retry", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded search config");
    Ok(config)
}

/// Write to `--output` when given, stdout otherwise.
pub(crate) fn write_output(text: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, text)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e))),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| CliError::io(e.to_string())),
    }
}

// ============================================================================
// columns
// ============================================================================

fn cmd_columns(
    file: PathBuf,
    sheet: Option<String>,
    delimiter: Option<char>,
    json: bool,
) -> Result<(), CliError> {
    let options = LoadOptions { sheet, delimiter: delimiter_byte(delimiter)? };
    let table = targetfind_io::load_table(&file, &options)?;
    let infos = table.columns();

    let text = if json {
        let mut s = serde_json::to_string_pretty(&infos)
            .map_err(|e| CliError::parse(e.to_string()))?;
        s.push('\n');
        s
    } else {
        render::columns(&infos)
    };
    write_output(&text, None)
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&path)?;
    let limits = match (config.max_subset_size, config.max_nodes) {
        (None, None) => "no limits".to_string(),
        (size, nodes) => format!(
            "max_subset_size {}, max_nodes {}",
            size.map_or("-".to_string(), |n| n.to_string()),
            nodes.map_or("-".to_string(), |n| n.to_string())
        ),
    };
    let text = format!(
        "ok: {} search, tolerance {}, {} target(s), {}\n",
        config.operation,
        config.tolerance,
        config.targets.len(),
        limits
    );
    write_output(&text, None)
}
