// search command: load items, run the matcher, report

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use targetfind_io::LoadOptions;
use targetfind_matcher::{run, CancelToken, NoProgress, Operation, ProgressSink, SearchConfig};

use crate::exit_codes::EXIT_NO_MATCH;
use crate::util::split_list;
use crate::{delimiter_byte, load_config, render, write_output, CliError};

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// CSV, TSV or Excel file
    pub file: PathBuf,

    /// Target values. Comma-separated; repeatable.
    #[arg(long, short = 't', value_name = "LIST", value_delimiter = ',', allow_hyphen_values = true)]
    pub targets: Vec<f64>,

    /// sum, difference, product or quotient [default: sum]
    #[arg(long = "op", value_parser = parse_operation)]
    pub op: Option<Operation>,

    /// Tolerance: absolute for sum/difference, relative for product/quotient
    #[arg(long, conflicts_with = "tolerance_pct")]
    pub tolerance: Option<f64>,

    /// Tolerance as a percentage (1 = 0.01)
    #[arg(long = "tolerance-pct", value_name = "PCT")]
    pub tolerance_pct: Option<f64>,

    /// Columns to search. Comma-separated; repeatable. Default: all numeric columns
    #[arg(long, short = 'c', value_name = "COLS")]
    pub columns: Vec<String>,

    /// Sheet name for workbooks (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Field delimiter for CSV (default: sniffed)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Largest subset the sum search builds
    #[arg(long)]
    pub max_subset_size: Option<usize>,

    /// Candidate evaluations allowed per target
    #[arg(long)]
    pub max_nodes: Option<u64>,

    /// Search targets in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Cancel the search after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// TOML config file; flags given here override it
    #[arg(long, env = "TFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// No progress spinner or notes on stderr
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse::<Operation>().map_err(|e| e.to_string())
}

/// Config file (if any) with command-line flags layered on top.
fn resolve_config(args: &SearchArgs) -> Result<SearchConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    if let Some(op) = args.op {
        config.operation = op;
    }
    if let Some(tol) = args.tolerance {
        config.tolerance = tol;
    }
    if let Some(pct) = args.tolerance_pct {
        config.tolerance = pct / 100.0;
    }
    if args.max_subset_size.is_some() {
        config.max_subset_size = args.max_subset_size;
    }
    if args.max_nodes.is_some() {
        config.max_nodes = args.max_nodes;
    }
    if args.parallel {
        config.parallel = true;
    }
    if !args.targets.is_empty() {
        config.targets = args.targets.clone();
    }

    if config.targets.is_empty() {
        return Err(CliError::args("no targets given")
            .with_hint("pass --targets 100,250 or set `targets` in the config file"));
    }
    config.validate()?;
    Ok(config)
}

/// Spinner on stderr showing the latest progress message.
fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

pub(crate) fn cmd_search(args: SearchArgs) -> Result<(), CliError> {
    let config = resolve_config(&args)?;

    let options = LoadOptions {
        sheet: args.sheet.clone(),
        delimiter: delimiter_byte(args.delimiter)?,
    };
    let table = targetfind_io::load_table(&args.file, &options)?;
    let items = table.items(&split_list(&args.columns))?;
    tracing::info!(
        items = items.len(),
        targets = config.targets.len(),
        operation = %config.operation,
        "starting search"
    );

    let cancel = CancelToken::new();
    if let Some(secs) = args.timeout_secs {
        let token = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            token.cancel();
        });
    }

    let show_progress = !args.quiet && !(args.json && args.output.is_none());
    let bar = show_progress.then(spinner);
    let report = |msg: &str| {
        if let Some(bar) = &bar {
            bar.set_message(msg.to_string());
        }
    };
    let sink = if bar.is_some() { &report as &dyn ProgressSink } else { &NoProgress };

    let start = Instant::now();
    let outcome = run(&items, &config.targets, &config, sink, &cancel);
    let elapsed = start.elapsed();
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }
    let output = outcome?;

    if output.summary.capped > 0 && !args.quiet {
        eprintln!(
            "note: {} target(s) stopped at max_nodes before the search finished",
            output.summary.capped
        );
    }

    let text = if args.json {
        let mut s = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::parse(e.to_string()))?;
        s.push('\n');
        s
    } else {
        render::report(&output, elapsed)
    };
    write_output(&text, args.output.as_deref())?;

    if output.results.is_empty() {
        return Err(CliError::silent(EXIT_NO_MATCH));
    }
    Ok(())
}
