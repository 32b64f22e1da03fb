//! One-sample Kolmogorov–Smirnov statistic and its asymptotic p-value.

/// Largest distance between the empirical CDF of `sorted` and `cdf`.
///
/// `sorted` must be in ascending order. Returns `None` for an empty sample or
/// when `cdf` cannot be evaluated at some point.
pub fn ks_statistic<F>(sorted: &[f64], cdf: F) -> Option<f64>
where
    F: Fn(f64) -> Option<f64>,
{
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len() as f64;
    let mut d: f64 = 0.0;
    for (i, &x) in sorted.iter().enumerate() {
        let f = cdf(x)?;
        let above = (i + 1) as f64 / n - f;
        let below = f - i as f64 / n;
        d = d.max(above).max(below);
    }
    Some(d)
}

/// Asymptotic Kolmogorov p-value for statistic `d` on `n` observations.
///
/// Uses the small-sample correction `λ = (√n + 0.12 + 0.11/√n) · d` and the
/// series `Q(λ) = 2 Σ (-1)^(k-1) exp(-2 k² λ²)`.
pub fn ks_pvalue(n: usize, d: f64) -> f64 {
    if n == 0 || !d.is_finite() {
        return f64::NAN;
    }
    let sn = (n as f64).sqrt();
    let lambda = (sn + 0.12 + 0.11 / sn) * d;
    kolmogorov_q(lambda)
}

fn kolmogorov_q(lambda: f64) -> f64 {
    // The series converges too slowly to be useful here, and Q is 1 to double precision.
    if lambda < 0.2 {
        return 1.0;
    }
    let a = -2.0 * lambda * lambda;
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = sign * (a * kf * kf).exp();
        sum += term;
        if term.abs() < 1e-12 * sum.abs() {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistic_of_perfect_uniform_grid_is_half_step() {
        let n = 10;
        let sorted: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
        let d = ks_statistic(&sorted, |x| Some(x.clamp(0.0, 1.0))).unwrap();
        assert!((d - 0.05).abs() < 1e-12, "d = {d}");
    }

    #[test]
    fn statistic_detects_shifted_sample() {
        let sorted: Vec<f64> = (0..100).map(|i| 0.5 + i as f64 / 200.0).collect();
        let d = ks_statistic(&sorted, |x| Some(x.clamp(0.0, 1.0))).unwrap();
        assert!(d > 0.49);
    }

    #[test]
    fn missing_cdf_yields_none() {
        assert_eq!(ks_statistic(&[1.0, 2.0], |_| None), None);
        assert_eq!(ks_statistic(&[], |x| Some(x)), None);
    }

    #[test]
    fn kolmogorov_q_matches_reference_values() {
        assert!((kolmogorov_q(1.0) - 0.269_999_7).abs() < 1e-6);
        assert!((kolmogorov_q(1.36) - 0.049_4).abs() < 1e-3);
        assert_eq!(kolmogorov_q(0.1), 1.0);
    }

    #[test]
    fn pvalue_decreases_with_distance() {
        let close = ks_pvalue(100, 0.05);
        let far = ks_pvalue(100, 0.3);
        assert!(close > 0.5);
        assert!(far < 1e-6);
    }
}
