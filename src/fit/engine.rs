//! Fit-and-rank: fit every candidate, score it, and order the survivors.
//!
//! Per request:
//! 1. build the density-normalized histogram of the sample
//! 2. fit each candidate by maximum likelihood (in parallel unless disabled)
//! 3. score it: sum of squared error against the histogram, AIC, BIC, plus
//!    KL divergence and the Kolmogorov–Smirnov statistic as diagnostics
//! 4. rank the survivors by the configured metric
//!
//! Candidates that cannot be fitted are skipped and reported in
//! [`FitSelection::skipped`]; the request only fails when nothing survives.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog;
use crate::domain::{FitConfig, FitQuality, FitResult, FittedParam, Sample};
use crate::error::FitError;
use crate::fit::candidates::CandidateSet;
use crate::fit::histogram::Histogram;
use crate::fit::mle::{fit_density, Estimate, FitFailure, MleOptions};
use crate::fit::ranking::Ranking;
use crate::math::{ks_pvalue, ks_statistic};
use crate::models::Density;

/// Output of fitting + ranking.
#[derive(Debug, Clone)]
pub struct FitSelection {
    /// First row of the full ranking.
    pub best: FitResult,
    /// Every successful fit, ordered by the configured metric.
    pub ranking: Ranking,
    /// Candidates that could not be fitted, in candidate order.
    pub skipped: Vec<(String, FitFailure)>,
    /// The empirical reference used for `sumsquare_error` and `kl_div`.
    pub histogram: Histogram,
}

impl FitSelection {
    /// First `min(n, survivors)` rows of the ranking.
    pub fn summary(&self, n: usize) -> &[FitResult] {
        self.ranking.summary(n)
    }
}

/// Progress notification, sent once per candidate as it completes.
#[derive(Debug, Clone, PartialEq)]
pub enum FitEvent {
    Fitted {
        distribution: String,
        index: usize,
        total: usize,
    },
    Skipped {
        distribution: String,
        index: usize,
        total: usize,
        reason: FitFailure,
    },
}

/// Fit and rank without progress reporting.
pub fn fit_and_rank(
    sample: &Sample,
    candidates: &CandidateSet,
    config: &FitConfig,
) -> Result<FitSelection, FitError> {
    fit_and_rank_with_progress(sample, candidates, config, |_| {})
}

/// Fit and rank, calling `on_event` as each candidate completes.
///
/// With `config.parallel` the callback may run on worker threads and in any
/// order; the returned ranking does not depend on it.
pub fn fit_and_rank_with_progress<F>(
    sample: &Sample,
    candidates: &CandidateSet,
    config: &FitConfig,
    on_event: F,
) -> Result<FitSelection, FitError>
where
    F: Fn(&FitEvent) + Sync,
{
    if config.bins == 0 {
        return Err(FitError::InvalidSettings("bins must be at least 1".to_string()));
    }
    if config.top_n == 0 {
        return Err(FitError::InvalidSettings("top must be at least 1".to_string()));
    }

    let Some(histogram) = Histogram::new(sample.values(), config.bins) else {
        return Err(FitError::NoDistributionFit);
    };

    let mut sorted = sample.values().to_vec();
    sorted.sort_by(f64::total_cmp);

    let total = candidates.len();
    let job = |(index, id): (usize, &&'static str)| {
        let outcome = fit_candidate(index, id, sample.values(), &sorted, &histogram, config);
        let event = match &outcome {
            Ok(_) => FitEvent::Fitted {
                distribution: id.to_string(),
                index,
                total,
            },
            Err(reason) => FitEvent::Skipped {
                distribution: id.to_string(),
                index,
                total,
                reason: reason.clone(),
            },
        };
        on_event(&event);
        (*id, outcome)
    };

    let started = Instant::now();
    let outcomes: Vec<(&str, Result<FitResult, FitFailure>)> = if config.parallel {
        candidates.ids().par_iter().enumerate().map(job).collect()
    } else {
        candidates.ids().iter().enumerate().map(job).collect()
    };

    let mut fits = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(fit) => fits.push(fit),
            Err(reason) => {
                debug!(distribution = id, %reason, "candidate skipped");
                skipped.push((id.to_string(), reason));
            }
        }
    }

    info!(
        fitted = fits.len(),
        skipped = skipped.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fitting finished"
    );

    if fits.is_empty() {
        return Err(FitError::NoDistributionFit);
    }

    let ranking = Ranking::new(fits, config.metric);
    let Some(best) = ranking.best().cloned() else {
        return Err(FitError::NoDistributionFit);
    };

    Ok(FitSelection {
        best,
        ranking,
        skipped,
        histogram,
    })
}

fn fit_candidate(
    index: usize,
    id: &str,
    values: &[f64],
    sorted: &[f64],
    histogram: &Histogram,
    config: &FitConfig,
) -> Result<FitResult, FitFailure> {
    let entry = catalog::lookup(id).map_err(|_| FitFailure::Unsupported)?;
    let density = entry.density().ok_or(FitFailure::Unsupported)?;

    let opts = MleOptions {
        deadline: Instant::now().checked_add(config.timeout),
        max_iterations: config.max_iterations,
    };
    let started = Instant::now();
    let estimate = fit_density(density, values, &opts)?;
    let quality = score(density, &estimate, sorted, histogram)?;

    debug!(
        distribution = id,
        iterations = estimate.iterations,
        elapsed_ms = started.elapsed().as_millis() as u64,
        sse = quality.sumsquare_error,
        aic = quality.aic,
        "candidate fitted"
    );

    let params = entry
        .param_names()
        .into_iter()
        .zip(estimate.params())
        .map(|(name, value)| FittedParam {
            name: name.to_string(),
            value,
        })
        .collect();

    Ok(FitResult {
        distribution: id.to_string(),
        candidate_index: index,
        params,
        quality,
    })
}

fn score(
    density: &Density,
    est: &Estimate,
    sorted: &[f64],
    histogram: &Histogram,
) -> Result<FitQuality, FitFailure> {
    let pdf = |x: f64| density.pdf(x, &est.shapes, est.loc, est.scale);

    let mut sumsquare_error = 0.0;
    let mut kl_div = 0.0;
    for (&center, &height) in histogram.centers.iter().zip(&histogram.heights) {
        let p = pdf(center);
        sumsquare_error += (p - height).powi(2);
        if height > 0.0 {
            kl_div += if p > 0.0 { height * (height / p).ln() } else { f64::INFINITY };
        }
    }

    let n = sorted.len();
    let k = (est.shapes.len() + 2) as f64;
    let aic = 2.0 * k - 2.0 * est.log_likelihood;
    let bic = k * (n as f64).ln() - 2.0 * est.log_likelihood;

    if !sumsquare_error.is_finite() {
        return Err(FitFailure::Numerical("non-finite sumsquare_error".to_string()));
    }
    if !(aic.is_finite() && bic.is_finite()) {
        return Err(FitFailure::Numerical("non-finite information criterion".to_string()));
    }

    let (ks_stat, ks_p) = if density.has_cdf() {
        let d = ks_statistic(sorted, |x| density.cdf(x, &est.shapes, est.loc, est.scale));
        let p = d.map(|d| ks_pvalue(n, d)).filter(|p| p.is_finite());
        (d, p)
    } else {
        (None, None)
    };

    Ok(FitQuality {
        sumsquare_error,
        aic,
        bic,
        kl_div,
        ks_statistic: ks_stat,
        ks_pvalue: ks_p,
        log_likelihood: est.log_likelihood,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateMode, Metric};
    use crate::fit::candidates::candidates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};
    use std::sync::Mutex;

    fn normal_sample(n: usize, seed: u64) -> Sample {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Normal::new(50.0, 5.0).unwrap();
        Sample::new((0..n).map(|_| dist.sample(&mut rng)).collect())
    }

    fn custom(ids: &[&str]) -> CandidateSet {
        candidates(CandidateMode::Custom, ids).unwrap()
    }

    #[test]
    fn common_candidates_on_normal_sample() {
        let sample = normal_sample(1000, 11);
        let set = candidates(CandidateMode::Common, &[] as &[&str]).unwrap();
        let selection = fit_and_rank(&sample, &set, &FitConfig::default()).unwrap();

        let summary = selection.summary(5);
        assert_eq!(summary.len(), 5);
        for pair in summary.windows(2) {
            assert!(pair[0].quality.sumsquare_error <= pair[1].quality.sumsquare_error);
        }
        let min = selection
            .ranking
            .rows()
            .iter()
            .map(|r| r.quality.sumsquare_error)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(selection.best.quality.sumsquare_error, min);
        assert_eq!(
            selection.ranking.len() + selection.skipped.len(),
            set.len()
        );
    }

    #[test]
    fn norm_parameters_match_sample_moments() {
        let sample = normal_sample(500, 5);
        let selection = fit_and_rank(&sample, &custom(&["norm"]), &FitConfig::default()).unwrap();
        let best = &selection.best;
        assert_eq!(best.distribution, "norm");

        let mean = sample.values().iter().sum::<f64>() / sample.len() as f64;
        assert!((best.param("loc").unwrap() - mean).abs() < 1e-9);
        assert!((best.param("scale").unwrap() - 5.0).abs() < 0.5);
        assert!(best.quality.ks_statistic.is_some());
        assert!(best.quality.ks_pvalue.unwrap() > 0.01);
    }

    #[test]
    fn unsupported_candidates_are_skipped() {
        let sample = normal_sample(200, 1);
        let selection =
            fit_and_rank(&sample, &custom(&["levy_stable", "norm"]), &FitConfig::default()).unwrap();
        assert_eq!(selection.ranking.len(), 1);
        assert_eq!(
            selection.skipped,
            vec![("levy_stable".to_string(), FitFailure::Unsupported)]
        );
    }

    #[test]
    fn nothing_fitted_is_an_error() {
        let sample = normal_sample(200, 1);
        let err = fit_and_rank(&sample, &custom(&["levy_stable", "kappa4"]), &FitConfig::default())
            .unwrap_err();
        assert_eq!(err, FitError::NoDistributionFit);
    }

    #[test]
    fn empty_and_constant_samples_fit_nothing() {
        let set = custom(&["norm", "gamma", "uniform"]);
        let empty = Sample::new(Vec::new());
        assert_eq!(
            fit_and_rank(&empty, &set, &FitConfig::default()).unwrap_err(),
            FitError::NoDistributionFit
        );
        let constant = Sample::new(vec![3.0; 50]);
        assert_eq!(
            fit_and_rank(&constant, &set, &FitConfig::default()).unwrap_err(),
            FitError::NoDistributionFit
        );
    }

    #[test]
    fn zero_bins_is_invalid() {
        let config = FitConfig {
            bins: 0,
            ..FitConfig::default()
        };
        let err = fit_and_rank(&normal_sample(10, 0), &custom(&["norm"]), &config).unwrap_err();
        assert!(matches!(err, FitError::InvalidSettings(_)));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let sample = normal_sample(300, 9);
        let set = custom(&["norm", "logistic", "gumbel_r", "laplace", "cauchy", "uniform"]);
        let parallel = fit_and_rank(&sample, &set, &FitConfig::default()).unwrap();
        let sequential = fit_and_rank(
            &sample,
            &set,
            &FitConfig {
                parallel: false,
                ..FitConfig::default()
            },
        )
        .unwrap();
        assert_eq!(parallel.ranking, sequential.ranking);
        assert_eq!(parallel.best, sequential.best);
    }

    #[test]
    fn metric_choice_reorders_without_changing_rows() {
        let sample = normal_sample(300, 4);
        let set = custom(&["norm", "laplace", "uniform", "expon"]);
        let by_sse = fit_and_rank(&sample, &set, &FitConfig::default()).unwrap();
        let by_aic = fit_and_rank(
            &sample,
            &set,
            &FitConfig {
                metric: Metric::Aic,
                ..FitConfig::default()
            },
        )
        .unwrap();

        assert_eq!(by_aic.ranking, by_sse.ranking.by(Metric::Aic));
        for pair in by_aic.ranking.rows().windows(2) {
            assert!(pair[0].quality.aic <= pair[1].quality.aic);
        }
    }

    #[test]
    fn chi2_and_gamma_agree_on_a_gamma_sample() {
        // chi2(df = 4, scale = 1.5) is gamma(a = 2, scale = 3).
        let mut rng = StdRng::seed_from_u64(17);
        let dist = rand_distr::Gamma::new(2.0, 3.0).unwrap();
        let sample = Sample::new((0..2000).map(|_| dist.sample(&mut rng)).collect());
        let config = FitConfig {
            metric: Metric::Aic,
            ..FitConfig::default()
        };
        let selection = fit_and_rank(&sample, &custom(&["chi2", "gamma"]), &config).unwrap();
        assert_eq!(selection.ranking.len(), 2);

        let aic = |id: &str| {
            selection
                .ranking
                .rows()
                .iter()
                .find(|r| r.distribution == id)
                .map(|r| r.quality.aic)
                .unwrap()
        };
        let (chi2, gamma) = (aic("chi2"), aic("gamma"));
        assert!((chi2 - gamma).abs() < 1.0, "chi2 aic {chi2} vs gamma aic {gamma}");
    }

    #[test]
    fn progress_reports_every_candidate() {
        let sample = normal_sample(100, 2);
        let set = custom(&["norm", "levy_stable", "expon"]);
        let events = Mutex::new(Vec::new());
        fit_and_rank_with_progress(&sample, &set, &FitConfig::default(), |e| {
            events.lock().unwrap().push(e.clone());
        })
        .unwrap();

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 3);
        let skipped = events
            .iter()
            .filter(|e| matches!(e, FitEvent::Skipped { .. }))
            .count();
        assert_eq!(skipped, 1);
    }
}
