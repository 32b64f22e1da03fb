//! Command-line parsing for the distribution fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CandidateMode, DEFAULT_BINS, DEFAULT_TIMEOUT, DEFAULT_TOP_N, Metric};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "distfit", version, about = "Fit candidate probability distributions to a CSV column")]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the distribution catalog.
    List(ListArgs),
    /// Show shape, dtypes and descriptive statistics of a CSV file.
    Describe(DescribeArgs),
    /// Plot a histogram of one column.
    Hist(HistArgs),
    /// Fit candidate distributions to one column and rank them.
    Fit(FitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    /// Only the common candidate list.
    #[arg(long)]
    pub common: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DescribeArgs {
    /// Input CSV (prompted for when omitted).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct HistArgs {
    /// Input CSV (prompted for when omitted).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Column to plot (prompted for when omitted).
    #[arg(short = 'c', long)]
    pub column: Option<String>,

    /// Number of histogram bins.
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for fitting and ranking.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Input CSV (prompted for when omitted).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Column to fit (prompted for when omitted).
    #[arg(short = 'c', long)]
    pub column: Option<String>,

    /// Candidate source. Defaults to `custom` when `-d` is given, `common` otherwise.
    #[arg(long, value_enum)]
    pub mode: Option<CandidateMode>,

    /// Distribution to fit in custom mode (repeatable, or comma-separated).
    #[arg(short = 'd', long = "dist", value_name = "ID", value_delimiter = ',')]
    pub distributions: Vec<String>,

    /// Histogram bins used for `sumsquare_error`.
    #[arg(long, env = "DISTFIT_BINS", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Ranking metric.
    #[arg(long, env = "DISTFIT_METRIC", value_enum, default_value_t = Metric::SumsquareError)]
    pub metric: Metric,

    /// Number of ranked rows to show.
    #[arg(long, env = "DISTFIT_TOP", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Per-candidate fitting timeout in seconds.
    #[arg(long, env = "DISTFIT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Optimizer iteration cap per candidate (default: 200 x parameter count).
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Fit candidates one at a time.
    #[arg(long)]
    pub sequential: bool,

    /// Render the histogram with the best fit overlaid.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Directory for `dist_summary_<timestamp>.csv`.
    #[arg(long, env = "DISTFIT_EXPORT_DIR", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Write the best fit to JSON.
    #[arg(long, value_name = "FILE")]
    pub export_json: Option<PathBuf>,
}
