//! Error types.
//!
//! - [`FitError`]: request-level failures of the fitting engine (what a caller
//!   can act on).
//! - [`AppError`]: what the binary reports, carrying a process exit code.
//!
//! Exit codes:
//! - 2: usage, configuration, or I/O problems
//! - 3: data problems (malformed sample, nothing fitted)
//! - 4: internal/export failures

/// Request-level failures surfaced by candidate enumeration and the engine.
///
/// Per-candidate problems are not represented here: they are recovered by
/// skipping the candidate (see `fit::FitFailure`).
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Custom mode was requested with nothing selected.
    EmptySelection,
    /// Identifier not present in the catalog.
    UnknownDistribution(String),
    /// Every candidate failed to fit (or the sample had no usable values).
    NoDistributionFit,
    /// The chosen column cannot serve as a numeric sample.
    MalformedSample(String),
    /// Engine settings outside their valid range.
    InvalidSettings(String),
}

impl FitError {
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::EmptySelection
            | FitError::UnknownDistribution(_)
            | FitError::InvalidSettings(_) => 2,
            FitError::NoDistributionFit | FitError::MalformedSample(_) => 3,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::EmptySelection => {
                write!(f, "No distributions selected. Pass at least one with `-d <name>`.")
            }
            FitError::UnknownDistribution(id) => write!(
                f,
                "Unknown distribution '{id}'. Run `distfit list` to see supported names."
            ),
            FitError::NoDistributionFit => {
                write!(f, "None of the candidate distributions could be fitted to the sample.")
            }
            FitError::MalformedSample(msg) => write!(f, "Malformed sample: {msg}"),
            FitError::InvalidSettings(msg) => write!(f, "Invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
