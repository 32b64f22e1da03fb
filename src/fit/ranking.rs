//! Ordering of successful fits by an error metric.

use crate::domain::{FitResult, Metric};

/// Successful fits in ascending metric order, ties broken by candidate index.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    metric: Metric,
    rows: Vec<FitResult>,
}

impl Ranking {
    pub fn new(mut rows: Vec<FitResult>, metric: Metric) -> Self {
        sort_rows(&mut rows, metric);
        Self { metric, rows }
    }

    /// Same rows ordered by another metric.
    pub fn by(&self, metric: Metric) -> Self {
        Self::new(self.rows.clone(), metric)
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn rows(&self) -> &[FitResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `min(n, len)` rows.
    pub fn summary(&self, n: usize) -> &[FitResult] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn best(&self) -> Option<&FitResult> {
        self.rows.first()
    }
}

fn sort_rows(rows: &mut [FitResult], metric: Metric) {
    rows.sort_by(|a, b| {
        metric
            .value(a)
            .total_cmp(&metric.value(b))
            .then(a.candidate_index.cmp(&b.candidate_index))
    });
}
