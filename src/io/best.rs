//! Read/write best-fit JSON files.
//!
//! The best-fit JSON is the portable representation of a run's winner:
//! identifier, parameters in canonical order, all metrics, and the
//! documentation link.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::domain::{FitQuality, FittedParam, Metric};
use crate::error::AppError;
use crate::fit::FitSelection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestFitFile {
    pub tool: String,
    pub column: String,
    pub metric: Metric,
    pub distribution: String,
    pub params: Vec<FittedParam>,
    pub quality: FitQuality,
    pub docs_url: String,
    pub fitted: usize,
    pub skipped: usize,
}

impl BestFitFile {
    pub fn from_selection(selection: &FitSelection, column: &str) -> Self {
        let best = &selection.best;
        Self {
            tool: "distfit".to_string(),
            column: column.to_string(),
            metric: selection.ranking.metric(),
            distribution: best.distribution.clone(),
            params: best.params.clone(),
            quality: best.quality.clone(),
            docs_url: catalog::docs_url(&best.distribution),
            fitted: selection.ranking.len(),
            skipped: selection.skipped.len(),
        }
    }
}

/// Write the best fit of `selection` as pretty JSON.
pub fn write_best_json(path: &Path, selection: &FitSelection, column: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &BestFitFile::from_selection(selection, column))
        .map_err(|e| AppError::new(4, format!("Failed to write best-fit JSON: {e}")))?;
    Ok(())
}

/// Read a best-fit JSON file.
pub fn read_best_json(path: &Path) -> Result<BestFitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid best-fit JSON: {e}")))
}
