//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the selected command (list, describe, hist, fit)
//! - prints reports/plots
//! - writes optional exports

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::picker::{prompt_for_column, prompt_for_csv_path, validate_csv_path};
use crate::cli::{Command, DescribeArgs, FitArgs, HistArgs, ListArgs};
use crate::domain::{CandidateMode, FitConfig, RunConfig};
use crate::error::AppError;
use crate::fit::FitEvent;
use crate::io::ingest::{Table, load_table};

pub mod pipeline;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
pub const LOG_ENV: &str = "DISTFIT_LOG";

/// Entry point for the `distfit` binary.
pub fn run() -> Result<(), AppError> {
    // Values in `.env` feed the `env = ...` flag fallbacks below.
    dotenvy::dotenv().ok();

    // We want `distfit data.csv` to behave like `distfit fit -f data.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::List(args) => handle_list(args),
        Command::Describe(args) => handle_describe(args),
        Command::Hist(args) => handle_hist(args),
        Command::Fit(args) => handle_fit(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_list(args: ListArgs) -> Result<(), AppError> {
    let entries: Vec<_> = if args.common {
        crate::catalog::COMMON
            .iter()
            .map(|id| crate::catalog::lookup(id))
            .collect::<Result<_, _>>()?
    } else {
        crate::catalog::all().iter().collect()
    };
    print!("{}", crate::report::format_catalog(&entries));
    Ok(())
}

fn handle_describe(args: DescribeArgs) -> Result<(), AppError> {
    let path = resolve_csv_path(args.file.as_deref())?;
    let table = load_table(&path)?;

    println!("{}", crate::report::format_table_overview(&path.display().to_string(), &table));
    println!("{}", crate::report::format_dtypes(&crate::report::dtypes(&table)));
    print!("{}", crate::report::format_describe(&crate::report::describe(&table)));
    Ok(())
}

fn handle_hist(args: HistArgs) -> Result<(), AppError> {
    let path = resolve_csv_path(args.file.as_deref())?;
    let table = load_table(&path)?;
    let column = resolve_column(args.column, &table)?;
    let load = table.sample(&column)?;

    print!(
        "{}",
        crate::plot::render_histogram(load.sample.values(), args.bins, args.width, args.height, None)
    );
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    // Reject an empty custom selection before any prompting.
    let mode = candidate_mode(&args);
    if mode == CandidateMode::Custom && args.distributions.is_empty() {
        return Err(crate::error::FitError::EmptySelection.into());
    }

    let path = resolve_csv_path(args.file.as_deref())?;
    // Prompting for a column needs the table; keep it for the fit.
    let (config, table) = match args.column.clone() {
        Some(column) => (run_config_from_args(&args, path, column), None),
        None => {
            let table = load_table(&path)?;
            let column = prompt_for_column(&table)?;
            (run_config_from_args(&args, path, column), Some(table))
        }
    };
    debug!(?config, "run configuration");

    let run = match table {
        Some(table) => pipeline::run_fit_on_table(table, &config, log_progress)?,
        None => pipeline::run_fit_with_progress(&config, log_progress)?,
    };

    // Print terminal output.
    println!(
        "{}",
        crate::report::format_sample_header(&config.csv_path.display().to_string(), &run.load)
    );
    println!("{}", crate::report::format_summary(&run.selection, config.fit.top_n));
    print!("{}", crate::report::format_best(&run.selection));
    let skipped = crate::report::format_skipped(&run.selection);
    if !skipped.is_empty() {
        print!("\n{skipped}");
    }

    if config.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_histogram(
                run.load.sample.values(),
                run.selection.histogram.bins(),
                config.plot_width,
                config.plot_height,
                Some(&run.selection.best),
            )
        );
    }

    // Optional exports.
    if let Some(dir) = &config.export_dir {
        let now = chrono::Local::now().naive_local();
        let path = crate::io::export::export_summary(dir, &run.selection.ranking, now)?;
        println!("\nSummary written to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::best::write_best_json(path, &run.selection, &run.load.column)?;
        println!("Best fit written to {}", path.display());
    }

    Ok(())
}

fn log_progress(event: &FitEvent) {
    match event {
        FitEvent::Fitted {
            distribution,
            index,
            total,
        } => info!(distribution = %distribution, index, total, "fitted"),
        FitEvent::Skipped {
            distribution,
            index,
            total,
            reason,
        } => info!(distribution = %distribution, index, total, %reason, "skipped"),
    }
}

fn resolve_csv_path(file: Option<&Path>) -> Result<PathBuf, AppError> {
    match file {
        Some(path) => validate_csv_path(path),
        None => prompt_for_csv_path(),
    }
}

fn resolve_column(column: Option<String>, table: &Table) -> Result<String, AppError> {
    match column {
        Some(column) => Ok(column),
        None => prompt_for_column(table),
    }
}

/// `--mode` when given, otherwise `custom` if distributions were named.
fn candidate_mode(args: &FitArgs) -> CandidateMode {
    args.mode.unwrap_or(if args.distributions.is_empty() {
        CandidateMode::Common
    } else {
        CandidateMode::Custom
    })
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        bins: args.bins,
        metric: args.metric,
        top_n: args.top,
        timeout: Duration::from_secs(args.timeout_secs),
        max_iterations: args.max_iter,
        parallel: !args.sequential,
    }
}

pub fn run_config_from_args(args: &FitArgs, csv_path: PathBuf, column: String) -> RunConfig {
    RunConfig {
        csv_path,
        column,
        mode: candidate_mode(args),
        selection: args.distributions.clone(),
        fit: fit_config_from_args(args),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_dir: args.export_dir.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so a bare CSV path means `fit -f <path>`.
///
/// Rules:
/// - `distfit`                         -> `distfit fit` (prompts for a file)
/// - `distfit data.csv ...`            -> `distfit fit -f data.csv ...`
/// - `distfit -c x ...`                -> `distfit fit -c x ...`
/// - `distfit --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "list" | "describe" | "hist" | "fit");
    if is_subcommand {
        return argv;
    }

    if arg1.to_ascii_lowercase().ends_with(".csv") {
        argv.splice(1..1, ["fit".to_string(), "-f".to_string()]);
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') && arg1 != "-v" && arg1 != "--verbose" {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
