//! Maximum-likelihood estimation for a single family.
//!
//! `norm`, `expon` and `uniform` have closed-form estimators. Every other
//! family is fitted by minimizing the negative log-likelihood with the
//! Nelder–Mead simplex over an unconstrained parameterization:
//!
//! ```text
//! θ = [t(shape_1), ..., t(shape_k), loc, ln(scale)]
//! ```
//!
//! where `t` is `ln` for positive shapes, `logit` for shapes in `(0, 1)` and
//! the identity otherwise. The starting simplex moves every coordinate of θ
//! by [`THETA_STEP`] (loc by that fraction of the scale), and the search is
//! restarted from its optimum until a restart stops improving.

use std::fmt;
use std::time::Instant;

use statrs::statistics::Statistics;

use crate::math::{minimize_with_steps, Minimum, SimplexError, SimplexOptions};
use crate::models::{Density, ShapeDomain, Support};

/// Why a single candidate could not be fitted. Recovered by skipping it.
#[derive(Debug, Clone, PartialEq)]
pub enum FitFailure {
    /// No in-crate density for the identifier.
    Unsupported,
    /// Estimation exceeded the per-candidate time bound.
    Timeout,
    /// Estimation or scoring produced non-finite values.
    Numerical(String),
    /// No feasible starting point for the sample (e.g. zero spread).
    InvalidStart,
}

impl fmt::Display for FitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitFailure::Unsupported => write!(f, "no density available for fitting"),
            FitFailure::Timeout => write!(f, "timed out"),
            FitFailure::Numerical(msg) => write!(f, "numerical failure: {msg}"),
            FitFailure::InvalidStart => write!(f, "no feasible starting point for this sample"),
        }
    }
}

/// Starting simplex step for shapes and `ln(scale)`; `loc` moves by this
/// fraction of the starting scale.
pub const THETA_STEP: f64 = 0.25;

/// Restarts from the reported optimum after the first search.
const MAX_RESTARTS: usize = 3;

/// Fitted parameters of one family.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub shapes: Vec<f64>,
    pub loc: f64,
    pub scale: f64,
    pub log_likelihood: f64,
    /// Optimizer iterations (0 for closed forms).
    pub iterations: usize,
}

impl Estimate {
    /// Parameters in canonical order: shapes, `loc`, `scale`.
    pub fn params(&self) -> Vec<f64> {
        let mut out = self.shapes.clone();
        out.push(self.loc);
        out.push(self.scale);
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct MleOptions {
    pub deadline: Option<Instant>,
    /// Optimizer iteration cap; default is 200 per free parameter.
    pub max_iterations: Option<usize>,
}

/// `Σ ln f(x_j)`, or `-inf` as soon as one observation is outside the support.
pub fn log_likelihood(density: &Density, values: &[f64], shapes: &[f64], loc: f64, scale: f64) -> f64 {
    let mut total = 0.0;
    for &x in values {
        let lp = density.ln_pdf(x, shapes, loc, scale);
        if lp == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        total += lp;
    }
    total
}

/// Estimate the parameters of `density` from `values`.
pub fn fit_density(
    density: &Density,
    values: &[f64],
    opts: &MleOptions,
) -> Result<Estimate, FitFailure> {
    if values.is_empty() {
        return Err(FitFailure::InvalidStart);
    }
    if let Some(estimate) = closed_form(density, values)? {
        return Ok(estimate);
    }

    let (loc0, scale0) = initial_loc_scale(density.support, values)?;
    let mut theta0: Vec<f64> = density
        .shapes
        .iter()
        .zip(density.initial)
        .map(|(&d, &v)| encode(d, v))
        .collect();
    theta0.push(loc0);
    theta0.push(scale0.ln());

    let k = density.shapes.len();
    let objective = |theta: &[f64]| {
        let (shapes, loc, scale) = decode(density.shapes, theta);
        if !density.accepts_shapes(&shapes) || !(scale.is_finite() && scale > 0.0) {
            return f64::INFINITY;
        }
        -log_likelihood(density, values, &shapes, loc, scale)
    };

    let mut simplex = SimplexOptions::for_dimension(theta0.len());
    simplex.deadline = opts.deadline;
    if let Some(cap) = opts.max_iterations {
        simplex.max_iterations = cap;
    }

    let run = |theta: &[f64]| {
        let steps = theta_steps(density, theta);
        minimize_with_steps(&objective, theta, &steps, &simplex).map_err(|e| match e {
            SimplexError::NonFiniteStart => FitFailure::InvalidStart,
            SimplexError::Timeout => FitFailure::Timeout,
        })
    };

    let mut minimum = run(&theta0)?;
    let mut iterations = minimum.iterations;
    for _ in 0..MAX_RESTARTS {
        let again: Minimum = run(&minimum.x)?;
        iterations += again.iterations;
        let improvement = minimum.value - again.value;
        if again.value < minimum.value {
            minimum = again;
        }
        if improvement <= simplex.fatol {
            break;
        }
    }

    let (shapes, loc, scale) = decode(density.shapes, &minimum.x);
    debug_assert_eq!(shapes.len(), k);
    let log_likelihood = log_likelihood(density, values, &shapes, loc, scale);
    if !log_likelihood.is_finite() {
        return Err(FitFailure::Numerical("non-finite log-likelihood at optimum".to_string()));
    }

    Ok(Estimate {
        shapes,
        loc,
        scale,
        log_likelihood,
        iterations,
    })
}

/// Per-coordinate starting steps for θ = `[shapes..., loc, ln(scale)]`.
///
/// `loc` moves away from the support boundary so the shifted vertex stays feasible.
fn theta_steps(density: &Density, theta: &[f64]) -> Vec<f64> {
    let k = density.shapes.len();
    let scale = theta[k + 1].exp();
    let direction = match density.support {
        Support::Negative => 1.0,
        Support::Real => 1.0,
        _ => -1.0,
    };
    let mut steps = vec![THETA_STEP; k];
    steps.push(direction * THETA_STEP * scale);
    steps.push(THETA_STEP);
    steps
}

fn closed_form(density: &Density, values: &[f64]) -> Result<Option<Estimate>, FitFailure> {
    let (lo, hi) = min_max(values);
    let mean = values.iter().mean();
    let (loc, scale) = match density.id {
        "norm" => (mean, values.iter().population_std_dev()),
        "expon" => (lo, mean - lo),
        "uniform" => (lo, hi - lo),
        _ => return Ok(None),
    };
    if !(scale.is_finite() && scale > 0.0) {
        return Err(FitFailure::InvalidStart);
    }

    let log_likelihood = log_likelihood(density, values, &[], loc, scale);
    if !log_likelihood.is_finite() {
        return Err(FitFailure::Numerical("non-finite log-likelihood".to_string()));
    }
    Ok(Some(Estimate {
        shapes: Vec::new(),
        loc,
        scale,
        log_likelihood,
        iterations: 0,
    }))
}

/// Starting `(loc, scale)` that places every observation inside the support.
fn initial_loc_scale(support: Support, values: &[f64]) -> Result<(f64, f64), FitFailure> {
    let (lo, hi) = min_max(values);
    let range = hi - lo;
    let mean = values.iter().mean();
    let std = values.iter().population_std_dev();
    if !(range > 0.0 && std > 0.0) {
        return Err(FitFailure::InvalidStart);
    }

    let pad = 0.01 * range;
    let (loc, scale) = match support {
        Support::Real => (mean, std),
        Support::Positive => {
            let loc = lo - pad;
            (loc, mean - loc)
        }
        Support::Negative => {
            let loc = hi + pad;
            (loc, loc - mean)
        }
        Support::Unit => (lo - pad, 1.02 * range),
        Support::AboveOne => (lo - 1.01 * std, std),
        Support::Interval(a, b) => {
            let scale = 1.02 * range / (b - a);
            (lo - pad - a * scale, scale)
        }
    };

    if loc.is_finite() && scale.is_finite() && scale > 0.0 {
        Ok((loc, scale))
    } else {
        Err(FitFailure::InvalidStart)
    }
}

fn encode(domain: ShapeDomain, v: f64) -> f64 {
    match domain {
        ShapeDomain::Positive => v.ln(),
        ShapeDomain::Real => v,
        ShapeDomain::Unit => (v / (1.0 - v)).ln(),
    }
}

fn decode_one(domain: ShapeDomain, t: f64) -> f64 {
    match domain {
        ShapeDomain::Positive => t.exp(),
        ShapeDomain::Real => t,
        ShapeDomain::Unit => 1.0 / (1.0 + (-t).exp()),
    }
}

fn decode(domains: &[ShapeDomain], theta: &[f64]) -> (Vec<f64>, f64, f64) {
    let k = domains.len();
    let shapes = domains
        .iter()
        .zip(&theta[..k])
        .map(|(&d, &t)| decode_one(d, t))
        .collect();
    (shapes, theta[k], theta[k + 1].exp())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::density;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::Distribution;
    use std::time::Duration;

    fn draw<D: Distribution<f64>>(dist: D, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn norm_uses_sample_mean_and_population_std() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let est = fit_density(density("norm").unwrap(), &values, &MleOptions::default()).unwrap();
        assert!((est.loc - 2.5).abs() < 1e-12);
        assert!((est.scale - 1.25_f64.sqrt()).abs() < 1e-12);
        assert_eq!(est.iterations, 0);
    }

    #[test]
    fn expon_and_uniform_closed_forms() {
        let values = [2.0, 3.0, 4.0, 7.0];
        let est = fit_density(density("expon").unwrap(), &values, &MleOptions::default()).unwrap();
        assert_eq!((est.loc, est.scale), (2.0, 2.0));

        let est = fit_density(density("uniform").unwrap(), &values, &MleOptions::default()).unwrap();
        assert_eq!((est.loc, est.scale), (2.0, 5.0));
        assert!((est.log_likelihood - (-4.0 * 5.0_f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn gamma_fit_is_at_least_as_likely_as_the_truth() {
        let values = draw(rand_distr::Gamma::new(3.0, 2.0).unwrap(), 2000, 42);
        let d = density("gamma").unwrap();
        let est = fit_density(d, &values, &MleOptions::default()).unwrap();
        let truth = log_likelihood(d, &values, &[3.0], 0.0, 2.0);

        assert_eq!(est.shapes.len(), 1);
        assert!(est.log_likelihood > truth - 1.0, "{} vs {}", est.log_likelihood, truth);
        assert!(est.shapes[0] > 1.5 && est.shapes[0] < 6.0, "a = {}", est.shapes[0]);
    }

    #[test]
    fn shaped_families_reach_the_likelihood_of_their_own_parameters() {
        use rand::distributions::Open01;

        let powerlaw = Open01.map(|u: f64| u.powf(1.0 / 2.5));
        let exponpow = Open01.map(|u: f64| (1.0 - (1.0 - u).ln()).ln().powf(1.0 / 2.7));
        let cases: Vec<(&str, Vec<f64>, Vec<f64>)> = vec![
            ("chi2", draw(rand_distr::ChiSquared::new(6.0).unwrap(), 2000, 21), vec![6.0]),
            ("powerlaw", draw(powerlaw, 2000, 22), vec![2.5]),
            ("exponpow", draw(exponpow, 2000, 23), vec![2.7]),
            ("lognorm", draw(rand_distr::LogNormal::new(0.0, 0.6).unwrap(), 2000, 24), vec![0.6]),
            ("beta", draw(rand_distr::Beta::new(2.0, 5.0).unwrap(), 2000, 25), vec![2.0, 5.0]),
        ];

        for (id, values, shapes) in cases {
            let d = density(id).unwrap();
            let truth = log_likelihood(d, &values, &shapes, 0.0, 1.0);
            assert!(truth.is_finite(), "{id}: truth not finite");
            let est = fit_density(d, &values, &MleOptions::default()).unwrap();
            assert!(
                est.log_likelihood >= truth - 5.0,
                "{id}: fitted {} vs truth {} (shapes {:?})",
                est.log_likelihood,
                truth,
                est.shapes
            );
        }
    }

    #[test]
    fn chi2_shape_moves_off_its_starting_value() {
        let values = draw(rand_distr::ChiSquared::new(6.0).unwrap(), 2000, 31);
        let est = fit_density(density("chi2").unwrap(), &values, &MleOptions::default()).unwrap();
        assert!(est.shapes[0] > 3.0 && est.shapes[0] < 12.0, "df = {}", est.shapes[0]);
    }

    #[test]
    fn constant_sample_has_no_feasible_start() {
        let values = [5.0; 10];
        for id in ["norm", "gamma", "beta"] {
            let err = fit_density(density(id).unwrap(), &values, &MleOptions::default()).unwrap_err();
            assert_eq!(err, FitFailure::InvalidStart, "{id}");
        }
    }

    #[test]
    fn expired_deadline_is_a_timeout() {
        let values = draw(rand_distr::Exp::new(1.0).unwrap(), 200, 7);
        let opts = MleOptions {
            deadline: Instant::now().checked_sub(Duration::from_secs(1)),
            max_iterations: None,
        };
        let err = fit_density(density("weibull_min").unwrap(), &values, &opts).unwrap_err();
        assert_eq!(err, FitFailure::Timeout);
    }

    #[test]
    fn initial_guess_is_inside_the_support() {
        let values = draw(rand_distr::Normal::new(10.0, 3.0).unwrap(), 500, 3);
        for id in ["pareto", "beta", "weibull_max", "rdist", "genhalflogistic", "triang"] {
            let d = density(id).unwrap();
            let (loc, scale) = initial_loc_scale(d.support, &values).unwrap();
            let ll = log_likelihood(d, &values, d.initial, loc, scale);
            assert!(ll.is_finite(), "{id} start is infeasible");
        }
    }

    #[test]
    fn shape_transforms_round_trip() {
        for (domain, v) in [(ShapeDomain::Positive, 2.5), (ShapeDomain::Unit, 0.3), (ShapeDomain::Real, -1.0)] {
            assert!((decode_one(domain, encode(domain, v)) - v).abs() < 1e-12);
        }
    }
}
