//! Nelder–Mead downhill simplex minimizer.
//!
//! Parameter estimation for most families has no closed form, and the
//! log-likelihood surface is rarely smooth enough to trust finite-difference
//! gradients near support boundaries. The simplex method only needs function
//! values, and copes with `+inf` (infeasible) points by simply never accepting
//! them.
//!
//! The variant follows the classic `fmin` recipe:
//!
//! - initial simplex: each coordinate moved by its own step (by default
//!   `0.05 * max(|x|, 1)`, so zero coordinates are not collapsed)
//! - reflection 1, expansion 2, contraction 0.5, shrink 0.5
//! - stop when both the simplex diameter and the spread of values are below tolerance

use std::time::Instant;

use nalgebra::DVector;

const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;
const DEFAULT_STEP: f64 = 0.05;

/// Stopping rules for [`minimize`].
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    pub max_iterations: usize,
    /// Absolute tolerance on vertex coordinates.
    pub xatol: f64,
    /// Absolute tolerance on objective values.
    pub fatol: f64,
    /// Wall-clock bound; exceeded means [`SimplexError::Timeout`].
    pub deadline: Option<Instant>,
}

impl SimplexOptions {
    /// Defaults for a problem with `dim` free parameters.
    pub fn for_dimension(dim: usize) -> Self {
        Self {
            max_iterations: 200 * dim.max(1),
            xatol: 1e-4,
            fatol: 1e-4,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexError {
    /// The objective is not finite at the starting point.
    NonFiniteStart,
    /// The deadline passed before convergence.
    Timeout,
}

/// Best vertex found.
#[derive(Debug, Clone)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    /// False when the iteration cap was hit first.
    pub converged: bool,
}

/// Default per-coordinate steps for the starting simplex.
pub fn default_steps(x0: &[f64]) -> Vec<f64> {
    x0.iter().map(|x| DEFAULT_STEP * x.abs().max(1.0)).collect()
}

/// Minimize `f` starting from `x0` with [`default_steps`].
///
/// Non-finite objective values are treated as `+inf`.
pub fn minimize<F>(f: F, x0: &[f64], opts: &SimplexOptions) -> Result<Minimum, SimplexError>
where
    F: FnMut(&[f64]) -> f64,
{
    minimize_with_steps(f, x0, &default_steps(x0), opts)
}

/// Minimize `f` from a starting simplex whose vertex `k` is `x0` moved by `steps[k]`
/// along coordinate `k`.
///
/// A zero or non-finite step falls back to the default step for that coordinate.
pub fn minimize_with_steps<F>(
    mut f: F,
    x0: &[f64],
    steps: &[f64],
    opts: &SimplexOptions,
) -> Result<Minimum, SimplexError>
where
    F: FnMut(&[f64]) -> f64,
{
    let mut eval = |x: &DVector<f64>| {
        let v = f(x.as_slice());
        if v.is_finite() { v } else { f64::INFINITY }
    };

    let n = x0.len();
    let start = DVector::from_column_slice(x0);
    let f0 = eval(&start);
    if !f0.is_finite() {
        return Err(SimplexError::NonFiniteStart);
    }
    if n == 0 {
        return Ok(Minimum {
            x: Vec::new(),
            value: f0,
            iterations: 0,
            converged: true,
        });
    }

    let mut sim: Vec<DVector<f64>> = Vec::with_capacity(n + 1);
    let mut fsim: Vec<f64> = Vec::with_capacity(n + 1);
    sim.push(start.clone());
    fsim.push(f0);
    for k in 0..n {
        let step = steps
            .get(k)
            .copied()
            .filter(|s| s.is_finite() && *s != 0.0)
            .unwrap_or_else(|| DEFAULT_STEP * start[k].abs().max(1.0));
        let mut y = start.clone();
        y[k] += step;
        fsim.push(eval(&y));
        sim.push(y);
    }
    sort_simplex(&mut sim, &mut fsim);

    let mut iterations = 0;
    let mut converged = false;
    while iterations < opts.max_iterations {
        if has_converged(&sim, &fsim, opts) {
            converged = true;
            break;
        }
        if opts.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SimplexError::Timeout);
        }

        let worst = sim[n].clone();
        let mut xbar: DVector<f64> = DVector::zeros(n);
        for v in &sim[..n] {
            xbar += v;
        }
        xbar /= n as f64;

        let xr = &xbar * (1.0 + RHO) - &worst * RHO;
        let fxr = eval(&xr);

        let mut shrink = false;
        if fxr < fsim[0] {
            let xe = &xbar * (1.0 + RHO * CHI) - &worst * (RHO * CHI);
            let fxe = eval(&xe);
            if fxe < fxr {
                sim[n] = xe;
                fsim[n] = fxe;
            } else {
                sim[n] = xr;
                fsim[n] = fxr;
            }
        } else if fxr < fsim[n - 1] {
            sim[n] = xr;
            fsim[n] = fxr;
        } else if fxr < fsim[n] {
            // outside contraction
            let xc = &xbar * (1.0 + PSI * RHO) - &worst * (PSI * RHO);
            let fxc = eval(&xc);
            if fxc <= fxr {
                sim[n] = xc;
                fsim[n] = fxc;
            } else {
                shrink = true;
            }
        } else {
            // inside contraction
            let xcc = &xbar * (1.0 - PSI) + &worst * PSI;
            let fxcc = eval(&xcc);
            if fxcc < fsim[n] {
                sim[n] = xcc;
                fsim[n] = fxcc;
            } else {
                shrink = true;
            }
        }

        if shrink {
            let best = sim[0].clone();
            for j in 1..=n {
                sim[j] = &best + (&sim[j] - &best) * SIGMA;
                fsim[j] = eval(&sim[j]);
            }
        }

        sort_simplex(&mut sim, &mut fsim);
        iterations += 1;
    }

    Ok(Minimum {
        x: sim[0].iter().copied().collect(),
        value: fsim[0],
        iterations,
        converged,
    })
}

fn has_converged(sim: &[DVector<f64>], fsim: &[f64], opts: &SimplexOptions) -> bool {
    let best = &sim[0];
    let x_spread = sim[1..]
        .iter()
        .map(|v| (v - best).amax())
        .fold(0.0_f64, f64::max);
    let f_spread = fsim[1..]
        .iter()
        .map(|v| (v - fsim[0]).abs())
        .fold(0.0_f64, f64::max);
    x_spread <= opts.xatol && f_spread <= opts.fatol
}

/// Order vertices by objective value; ties keep their current order.
fn sort_simplex(sim: &mut Vec<DVector<f64>>, fsim: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..fsim.len()).collect();
    order.sort_by(|&a, &b| fsim[a].total_cmp(&fsim[b]));
    *sim = order.iter().map(|&i| sim[i].clone()).collect();
    *fsim = order.iter().map(|&i| fsim[i]).collect();
}
