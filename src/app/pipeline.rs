//! Shared "fit pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! candidates -> CSV load -> column sample -> fit/rank
//!
//! Callers that already hold the table (after prompting for a column) enter
//! at the column step through [`run_fit_on_table`].
//!
//! The CLI can then focus on presentation and exports.

use tracing::info;

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::fit::{CandidateSet, FitEvent, FitSelection, candidates, fit_and_rank_with_progress};
use crate::io::ingest::{SampleLoad, Table, load_table};

/// All computed outputs of a single `distfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: Table,
    pub load: SampleLoad,
    pub candidates: CandidateSet,
    pub selection: FitSelection,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    run_fit_with_progress(config, |_| {})
}

/// Execute the pipeline, forwarding per-candidate progress to `on_event`.
///
/// The candidate set is resolved before the file is read, so an empty or
/// unknown selection fails without touching the input.
pub fn run_fit_with_progress<F>(config: &RunConfig, on_event: F) -> Result<RunOutput, AppError>
where
    F: Fn(&FitEvent) + Sync,
{
    // 1) Resolve candidates.
    let candidates = candidates(config.mode, &config.selection)?;

    // 2) Load the table.
    let table = load_table(&config.csv_path)?;

    fit_table(table, candidates, config, on_event)
}

/// Same as [`run_fit_with_progress`] for a table the caller already loaded
/// (for example to prompt for a column). `config.csv_path` is only reported.
pub fn run_fit_on_table<F>(table: Table, config: &RunConfig, on_event: F) -> Result<RunOutput, AppError>
where
    F: Fn(&FitEvent) + Sync,
{
    let candidates = candidates(config.mode, &config.selection)?;
    fit_table(table, candidates, config, on_event)
}

fn fit_table<F>(
    table: Table,
    candidates: CandidateSet,
    config: &RunConfig,
    on_event: F,
) -> Result<RunOutput, AppError>
where
    F: Fn(&FitEvent) + Sync,
{
    // 3) Pull the requested column.
    let load = table.sample(&config.column)?;
    info!(
        path = %config.csv_path.display(),
        column = %load.column,
        n = load.sample.len(),
        dropped = load.dropped,
        candidates = candidates.len(),
        "sample loaded"
    );

    // 4) Fit and rank.
    let selection = fit_and_rank_with_progress(&load.sample, &candidates, &config.fit, on_event)?;

    Ok(RunOutput {
        table,
        load,
        candidates,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateMode, FitConfig};
    use crate::error::FitError;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(path: PathBuf, mode: CandidateMode, selection: &[&str]) -> RunConfig {
        RunConfig {
            csv_path: path,
            column: "x".to_string(),
            mode,
            selection: selection.iter().map(|s| s.to_string()).collect(),
            fit: FitConfig::default(),
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_dir: None,
            export_json: None,
        }
    }

    fn write_csv(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("distfit-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn empty_selection_fails_before_reading_the_file() {
        let events = AtomicUsize::new(0);
        let cfg = config(PathBuf::from("missing.csv"), CandidateMode::Custom, &[]);
        let err = run_fit_with_progress(&cfg, |_| {
            events.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), FitError::EmptySelection.to_string());
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fits_the_requested_column() {
        let mut body = String::from("id,x\n");
        for i in 0..120 {
            body.push_str(&format!("{i},{}\n", 2.0 + (i as f64 * 0.377).fract() * 3.0));
        }
        let path = write_csv("pipeline.csv", &body);
        let out = run_fit(&config(path.clone(), CandidateMode::Custom, &["uniform", "norm"]));
        std::fs::remove_file(&path).ok();

        let out = out.unwrap();
        assert_eq!(out.load.column, "x");
        assert_eq!(out.load.sample.len(), 120);
        assert_eq!(out.candidates.ids(), &["uniform", "norm"]);
        assert_eq!(out.selection.ranking.len(), 2);
        assert_eq!(out.selection.best.distribution, "uniform");
    }

    #[test]
    fn preloaded_table_is_not_read_again() {
        let path = write_csv("pipeline-preloaded.csv", "x\n1.0\n2.5\n3.1\n4.2\n5.0\n6.4\n");
        let table = load_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let out = run_fit_on_table(table, &config(path, CandidateMode::Custom, &["norm"]), |_| {}).unwrap();
        assert_eq!(out.load.sample.len(), 6);
        assert_eq!(out.selection.best.distribution, "norm");
    }

    #[test]
    fn preloaded_table_still_rejects_an_empty_selection() {
        let path = write_csv("pipeline-empty-sel.csv", "x\n1\n2\n");
        let table = load_table(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let err = run_fit_on_table(table, &config(PathBuf::from("unused.csv"), CandidateMode::Custom, &[]), |_| {})
            .unwrap_err();
        assert_eq!(err.to_string(), FitError::EmptySelection.to_string());
    }

    #[test]
    fn text_column_is_a_data_error() {
        let path = write_csv("pipeline-text.csv", "x\na\nb\n");
        let err = run_fit(&config(path.clone(), CandidateMode::Common, &[])).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 3);
    }
}
