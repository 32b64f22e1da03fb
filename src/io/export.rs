//! Export the full ranking to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, and to be read back by [`read_summary_csv`]. Every successful fit
//! is written, not just the summary rows shown on screen.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::FitResult;
use crate::error::AppError;
use crate::fit::Ranking;

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub distribution: String,
    pub sumsquare_error: f64,
    pub aic: f64,
    pub bic: f64,
    pub kl_div: f64,
    pub ks_statistic: Option<f64>,
    pub ks_pvalue: Option<f64>,
    /// `name=value` pairs joined by `;`, in canonical order.
    pub params: String,
}

impl SummaryRecord {
    pub fn from_fit(rank: usize, fit: &FitResult) -> Self {
        let params = fit
            .params
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect::<Vec<_>>()
            .join(";");
        Self {
            rank,
            distribution: fit.distribution.clone(),
            sumsquare_error: fit.quality.sumsquare_error,
            aic: fit.quality.aic,
            bic: fit.quality.bic,
            kl_div: fit.quality.kl_div,
            ks_statistic: fit.quality.ks_statistic,
            ks_pvalue: fit.quality.ks_pvalue,
            params,
        }
    }

    /// Decode the `params` column.
    pub fn parsed_params(&self) -> Result<Vec<(String, f64)>, String> {
        if self.params.is_empty() {
            return Ok(Vec::new());
        }
        self.params
            .split(';')
            .map(|pair| {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("malformed parameter '{pair}'"))?;
                let value = value
                    .parse::<f64>()
                    .map_err(|e| format!("invalid value for '{name}': {e}"))?;
                Ok((name.to_string(), value))
            })
            .collect()
    }
}

/// `dist_summary_<YYYYMMDD-HHMMSS>.csv` for the given local time.
pub fn summary_file_name(now: NaiveDateTime) -> String {
    format!("dist_summary_{}.csv", now.format("%Y%m%d-%H%M%S"))
}

/// Write every row of `ranking` to `path`.
pub fn write_summary_csv(path: &Path, ranking: &Ranking) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    let mut writer = csv::Writer::from_writer(file);

    for (i, fit) in ranking.rows().iter().enumerate() {
        writer
            .serialize(SummaryRecord::from_fit(i + 1, fit))
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the ranking into `dir` under a timestamped name; returns the path.
pub fn export_summary(dir: &Path, ranking: &Ranking, now: NaiveDateTime) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::new(4, format!("Failed to create export directory '{}': {e}", dir.display()))
    })?;
    let path = dir.join(summary_file_name(now));
    write_summary_csv(&path, ranking)?;
    tracing::info!(path = %path.display(), rows = ranking.len(), "summary exported");
    Ok(path)
}

/// Read a file written by [`write_summary_csv`].
pub fn read_summary_csv(path: &Path) -> Result<Vec<SummaryRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary CSV '{}': {e}", path.display())))?;
    let mut reader = csv::Reader::from_reader(file);
    reader
        .deserialize()
        .collect::<Result<Vec<SummaryRecord>, _>>()
        .map_err(|e| AppError::new(2, format!("Invalid summary CSV: {e}")))
}
