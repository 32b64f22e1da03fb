//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and ranking
//! - exported to CSV/JSON
//! - reloaded later for comparisons

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Default number of histogram bins used for the sum-of-squared-error metric.
pub const DEFAULT_BINS: usize = 100;

/// Default number of rows in the summary table.
pub const DEFAULT_TOP_N: usize = 5;

/// Default per-candidate safety bound.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error metric used to rank fits (lower is better for all of them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Sum of squared error between fitted density and histogram heights.
    #[default]
    #[value(name = "sumsquare_error")]
    SumsquareError,
    /// Akaike Information Criterion.
    Aic,
    /// Bayesian Information Criterion.
    Bic,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::SumsquareError, Metric::Aic, Metric::Bic];

    /// Column label used in tables and exports.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::SumsquareError => "sumsquare_error",
            Metric::Aic => "aic",
            Metric::Bic => "bic",
        }
    }

    /// Read this metric from a fit result.
    pub fn value(self, fit: &FitResult) -> f64 {
        match self {
            Metric::SumsquareError => fit.quality.sumsquare_error,
            Metric::Aic => fit.quality.aic,
            Metric::Bic => fit.quality.bic,
        }
    }
}

/// How the candidate set is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CandidateMode {
    /// The fixed list of ten widely used distributions.
    Common,
    /// Exactly the user's selection, in selection order.
    Custom,
}

/// An ordered numeric sample (one column of the input table).
///
/// Non-finite values are dropped on construction; `dropped()` reports how many.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    dropped: usize,
}

impl Sample {
    pub fn new(values: Vec<f64>) -> Self {
        let total = values.len();
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let dropped = total - values.len();
        Self { values, dropped }
    }

    /// Build a sample, counting extra dropped cells (e.g. empty CSV cells)
    /// that never made it into `values`.
    pub fn with_missing(values: Vec<f64>, missing: usize) -> Self {
        let mut sample = Self::new(values);
        sample.dropped += missing;
        sample
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// A single fitted parameter, labelled with its canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedParam {
    pub name: String,
    pub value: f64,
}

/// Goodness-of-fit diagnostics for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sumsquare_error: f64,
    pub aic: f64,
    pub bic: f64,
    /// Kullback–Leibler divergence of the histogram from the fitted density.
    #[serde(deserialize_with = "infinite_if_null")]
    pub kl_div: f64,
    /// One-sample Kolmogorov–Smirnov statistic (absent without a closed-form CDF).
    pub ks_statistic: Option<f64>,
    pub ks_pvalue: Option<f64>,
    pub log_likelihood: f64,
    /// Number of observations used.
    pub n: usize,
}

/// JSON has no infinity; serde_json writes it as `null`.
fn infinite_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// Fit output for a single candidate distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub distribution: String,
    /// Position of the distribution in the candidate set (tie-break key).
    pub candidate_index: usize,
    /// Parameters in canonical order: shapes, then `loc`, then `scale`.
    pub params: Vec<FittedParam>,
    pub quality: FitQuality,
}

impl FitResult {
    /// Look up a fitted parameter by canonical name.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.iter().find(|p| p.name == name).map(|p| p.value)
    }

    /// Number of free parameters (used by the information criteria).
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Engine settings for one fitting request.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Histogram bin count for the sum-of-squared-error metric.
    pub bins: usize,
    /// Metric used for ranking.
    pub metric: Metric,
    /// Number of rows in the summary table.
    pub top_n: usize,
    /// Per-candidate wall-clock bound on parameter estimation.
    pub timeout: Duration,
    /// Optional cap on optimizer iterations (default: 200 per parameter).
    pub max_iterations: Option<usize>,
    /// Fit candidates in parallel (results are identical either way).
    pub parallel: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            metric: Metric::default(),
            top_n: DEFAULT_TOP_N,
            timeout: DEFAULT_TIMEOUT,
            max_iterations: None,
            parallel: true,
        }
    }
}

/// A full `distfit fit` run as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and environment).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    pub column: String,
    pub mode: CandidateMode,
    pub selection: Vec<String>,
    pub fit: FitConfig,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Directory receiving `dist_summary_<timestamp>.csv`.
    pub export_dir: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
