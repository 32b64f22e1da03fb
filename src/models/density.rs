//! Standardized log-densities for the fittable part of the catalog.
//!
//! Every family is expressed for `z = (x - loc) / scale`:
//!
//! ```text
//! ln f(x; shapes, loc, scale) = ln g(z; shapes) - ln(scale)
//! ```
//!
//! so `loc` and `scale` are handled once, generically, and each family only
//! provides `ln g` (and, where it has a closed form, the standardized CDF).
//!
//! Outside the support `ln g` is `-inf`. Singular points (`+inf`) and NaNs are
//! also mapped to `-inf`: a parameter set that puts an observation on a
//! singularity is treated as infeasible rather than infinitely likely.

use std::f64::consts::{FRAC_2_PI, FRAC_PI_4, LN_2, PI, SQRT_2};

use statrs::distribution::{
    Beta, Cauchy, Chi, ChiSquared, Continuous, ContinuousCDF, FisherSnedecor, Gamma,
    InverseGamma, LogNormal, StudentsT, Weibull,
};
use statrs::function::beta::{checked_beta_reg, checked_ln_beta};
use statrs::function::erf::{erf, erfc};
use statrs::function::gamma::{checked_gamma_lr, checked_gamma_ur, ln_gamma};

const NEG_INF: f64 = f64::NEG_INFINITY;
const LN_PI: f64 = 1.144_729_885_849_400_2;
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;
/// `|c|` below which shape-dependent families switch to their `c = 0` limit.
const ZERO_SHAPE: f64 = 1e-12;

type LnPdf = fn(f64, &[f64]) -> f64;
type Cdf = fn(f64, &[f64]) -> f64;

/// Support of the standardized variable `z`, used to place the initial guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Support {
    /// `(-inf, inf)`
    Real,
    /// `[0, inf)`
    Positive,
    /// `(-inf, 0]`
    Negative,
    /// `[0, 1]`
    Unit,
    /// `[1, inf)`
    AboveOne,
    /// `[lo, hi]`
    Interval(f64, f64),
}

/// Valid range of a shape parameter (drives the optimizer's reparameterization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeDomain {
    /// `(0, inf)`, optimized as `ln(v)`
    Positive,
    /// any finite value
    Real,
    /// `(0, 1)`, optimized as `logit(v)`
    Unit,
}

impl ShapeDomain {
    pub fn contains(self, v: f64) -> bool {
        match self {
            ShapeDomain::Positive => v.is_finite() && v > 0.0,
            ShapeDomain::Real => v.is_finite(),
            ShapeDomain::Unit => v > 0.0 && v < 1.0,
        }
    }
}

/// A fittable continuous family.
pub struct Density {
    pub id: &'static str,
    pub shapes: &'static [ShapeDomain],
    /// Starting values for the shape parameters.
    pub initial: &'static [f64],
    pub support: Support,
    ln_pdf: LnPdf,
    cdf: Option<Cdf>,
}

impl std::fmt::Debug for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Density")
            .field("id", &self.id)
            .field("shapes", &self.shapes)
            .field("support", &self.support)
            .field("has_cdf", &self.cdf.is_some())
            .finish()
    }
}

impl Density {
    /// True when `shapes` has the right length and every value is in its domain.
    pub fn accepts_shapes(&self, shapes: &[f64]) -> bool {
        shapes.len() == self.shapes.len()
            && self.shapes.iter().zip(shapes).all(|(d, &v)| d.contains(v))
    }

    /// `ln g(z; shapes)` for the standardized variable.
    pub fn ln_pdf_standard(&self, z: f64, shapes: &[f64]) -> f64 {
        let v = (self.ln_pdf)(z, shapes);
        if v.is_nan() || v == f64::INFINITY { NEG_INF } else { v }
    }

    /// `ln f(x; shapes, loc, scale)`.
    pub fn ln_pdf(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> f64 {
        self.ln_pdf_standard((x - loc) / scale, shapes) - scale.ln()
    }

    pub fn pdf(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> f64 {
        self.ln_pdf(x, shapes, loc, scale).exp()
    }

    pub fn has_cdf(&self) -> bool {
        self.cdf.is_some()
    }

    /// `F(x; shapes, loc, scale)` when the family has a closed-form CDF.
    pub fn cdf(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> Option<f64> {
        let cdf = self.cdf?;
        let v = cdf((x - loc) / scale, shapes);
        v.is_finite().then(|| v.clamp(0.0, 1.0))
    }
}

/// Look up the density for a catalog identifier.
pub fn density(id: &str) -> Option<&'static Density> {
    DENSITIES.iter().find(|d| d.id == id)
}

/// Identifiers with an in-crate density.
pub fn density_ids() -> impl Iterator<Item = &'static str> {
    DENSITIES.iter().map(|d| d.id)
}

use self::ShapeDomain::{Positive as P, Real as R, Unit as U};

const fn family(
    id: &'static str,
    shapes: &'static [ShapeDomain],
    initial: &'static [f64],
    support: Support,
    ln_pdf: LnPdf,
    cdf: Option<Cdf>,
) -> Density {
    Density {
        id,
        shapes,
        initial,
        support,
        ln_pdf,
        cdf,
    }
}

static DENSITIES: &[Density] = &[
    family("alpha", &[P], &[1.0], Support::Positive, alpha, Some(alpha_cdf)),
    family("anglit", &[], &[], Support::Interval(-FRAC_PI_4, FRAC_PI_4), anglit, Some(anglit_cdf)),
    family("arcsine", &[], &[], Support::Unit, arcsine, Some(arcsine_cdf)),
    family("beta", &[P, P], &[1.0, 1.0], Support::Unit, beta, Some(beta_cdf)),
    family("betaprime", &[P, P], &[1.0, 1.0], Support::Positive, betaprime, Some(betaprime_cdf)),
    family("bradford", &[P], &[1.0], Support::Unit, bradford, Some(bradford_cdf)),
    family("burr", &[P, P], &[1.0, 1.0], Support::Positive, burr, Some(burr_cdf)),
    family("burr12", &[P, P], &[1.0, 1.0], Support::Positive, burr12, Some(burr12_cdf)),
    family("cauchy", &[], &[], Support::Real, cauchy, Some(cauchy_cdf)),
    family("chi", &[P], &[1.0], Support::Positive, chi, Some(chi_cdf)),
    family("chi2", &[P], &[1.0], Support::Positive, chi2, Some(chi2_cdf)),
    family("cosine", &[], &[], Support::Interval(-PI, PI), cosine, Some(cosine_cdf)),
    family("dgamma", &[P], &[1.0], Support::Real, dgamma, Some(dgamma_cdf)),
    family("dweibull", &[P], &[1.0], Support::Real, dweibull, Some(dweibull_cdf)),
    family("erlang", &[P], &[1.0], Support::Positive, gamma, Some(gamma_cdf)),
    family("expon", &[], &[], Support::Positive, expon, Some(expon_cdf)),
    family("exponnorm", &[P], &[1.0], Support::Real, exponnorm, Some(exponnorm_cdf)),
    family("exponpow", &[P], &[1.0], Support::Positive, exponpow, Some(exponpow_cdf)),
    family("exponweib", &[P, P], &[1.0, 1.0], Support::Positive, exponweib, Some(exponweib_cdf)),
    family("f", &[P, P], &[1.0, 1.0], Support::Positive, f_dist, Some(f_dist_cdf)),
    family("fatiguelife", &[P], &[1.0], Support::Positive, fatiguelife, Some(fatiguelife_cdf)),
    family("fisk", &[P], &[1.0], Support::Positive, fisk, Some(fisk_cdf)),
    family("foldcauchy", &[P], &[1.0], Support::Positive, foldcauchy, Some(foldcauchy_cdf)),
    family("foldnorm", &[P], &[1.0], Support::Positive, foldnorm, Some(foldnorm_cdf)),
    family("frechet_l", &[P], &[1.0], Support::Negative, weibull_max, Some(weibull_max_cdf)),
    family("frechet_r", &[P], &[1.0], Support::Positive, weibull_min, Some(weibull_min_cdf)),
    family("gamma", &[P], &[1.0], Support::Positive, gamma, Some(gamma_cdf)),
    family("genextreme", &[R], &[0.0], Support::Real, genextreme, Some(genextreme_cdf)),
    family("gengamma", &[P, P], &[1.0, 1.0], Support::Positive, gengamma, Some(gengamma_cdf)),
    family(
        "genhalflogistic",
        &[P],
        &[0.5],
        Support::Interval(0.0, 2.0),
        genhalflogistic,
        Some(genhalflogistic_cdf),
    ),
    family("genlogistic", &[P], &[1.0], Support::Real, genlogistic, Some(genlogistic_cdf)),
    family("gennorm", &[P], &[2.0], Support::Real, gennorm, Some(gennorm_cdf)),
    family("genpareto", &[R], &[0.0], Support::Positive, genpareto, Some(genpareto_cdf)),
    family("gilbrat", &[], &[], Support::Positive, gilbrat, Some(gilbrat_cdf)),
    family("gompertz", &[P], &[1.0], Support::Positive, gompertz, Some(gompertz_cdf)),
    family("gumbel_l", &[], &[], Support::Real, gumbel_l, Some(gumbel_l_cdf)),
    family("gumbel_r", &[], &[], Support::Real, gumbel_r, Some(gumbel_r_cdf)),
    family("halfcauchy", &[], &[], Support::Positive, halfcauchy, Some(halfcauchy_cdf)),
    family("halfgennorm", &[P], &[1.0], Support::Positive, halfgennorm, Some(halfgennorm_cdf)),
    family("halflogistic", &[], &[], Support::Positive, halflogistic, Some(halflogistic_cdf)),
    family("halfnorm", &[], &[], Support::Positive, halfnorm, Some(halfnorm_cdf)),
    family("hypsecant", &[], &[], Support::Real, hypsecant, Some(hypsecant_cdf)),
    family("invgamma", &[P], &[1.0], Support::Positive, invgamma, Some(invgamma_cdf)),
    family("invgauss", &[P], &[1.0], Support::Positive, invgauss, Some(invgauss_cdf)),
    family("invweibull", &[P], &[1.0], Support::Positive, invweibull, Some(invweibull_cdf)),
    family("johnsonsb", &[R, P], &[0.0, 1.0], Support::Unit, johnsonsb, Some(johnsonsb_cdf)),
    family("johnsonsu", &[R, P], &[0.0, 1.0], Support::Real, johnsonsu, Some(johnsonsu_cdf)),
    family("kappa3", &[P], &[1.0], Support::Positive, kappa3, Some(kappa3_cdf)),
    family("laplace", &[], &[], Support::Real, laplace, Some(laplace_cdf)),
    family("levy", &[], &[], Support::Positive, levy, Some(levy_cdf)),
    family("levy_l", &[], &[], Support::Negative, levy_l, Some(levy_l_cdf)),
    family("loggamma", &[P], &[1.0], Support::Real, loggamma, Some(loggamma_cdf)),
    family("logistic", &[], &[], Support::Real, logistic, Some(logistic_cdf)),
    family("loglaplace", &[P], &[1.0], Support::Positive, loglaplace, Some(loglaplace_cdf)),
    family("lognorm", &[P], &[1.0], Support::Positive, lognorm, Some(lognorm_cdf)),
    family("lomax", &[P], &[1.0], Support::Positive, lomax, Some(lomax_cdf)),
    family("maxwell", &[], &[], Support::Positive, maxwell, Some(maxwell_cdf)),
    family("mielke", &[P, P], &[1.0, 1.0], Support::Positive, mielke, Some(mielke_cdf)),
    family("moyal", &[], &[], Support::Real, moyal, Some(moyal_cdf)),
    family("nakagami", &[P], &[1.0], Support::Positive, nakagami, Some(nakagami_cdf)),
    family("norm", &[], &[], Support::Real, norm, Some(norm_cdf)),
    family("pareto", &[P], &[1.0], Support::AboveOne, pareto, Some(pareto_cdf)),
    family("powerlaw", &[P], &[1.0], Support::Unit, powerlaw, Some(powerlaw_cdf)),
    family(
        "powerlognorm",
        &[P, P],
        &[1.0, 1.0],
        Support::Positive,
        powerlognorm,
        Some(powerlognorm_cdf),
    ),
    family("powernorm", &[P], &[1.0], Support::Real, powernorm, Some(powernorm_cdf)),
    family("rayleigh", &[], &[], Support::Positive, rayleigh, Some(rayleigh_cdf)),
    family("rdist", &[P], &[2.0], Support::Interval(-1.0, 1.0), rdist, Some(rdist_cdf)),
    family("recipinvgauss", &[P], &[1.0], Support::Positive, recipinvgauss, None),
    family("semicircular", &[], &[], Support::Interval(-1.0, 1.0), semicircular, Some(semicircular_cdf)),
    family("skewnorm", &[R], &[0.0], Support::Real, skewnorm, None),
    family("t", &[P], &[5.0], Support::Real, student_t, Some(student_t_cdf)),
    family("triang", &[U], &[0.5], Support::Unit, triang, Some(triang_cdf)),
    family("truncexpon", &[P], &[1.0], Support::Unit, truncexpon, Some(truncexpon_cdf)),
    family("uniform", &[], &[], Support::Unit, uniform, Some(uniform_cdf)),
    family("wald", &[], &[], Support::Positive, wald, Some(wald_cdf)),
    family("weibull_max", &[P], &[1.0], Support::Negative, weibull_max, Some(weibull_max_cdf)),
    family("weibull_min", &[P], &[1.0], Support::Positive, weibull_min, Some(weibull_min_cdf)),
];

// Shared helpers.

fn ln_phi(z: f64) -> f64 {
    -0.5 * z * z - LN_SQRT_2PI
}

fn phi_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

fn ln_phi_cdf(z: f64) -> f64 {
    phi_cdf(z).ln()
}

/// `ln(1 + e^z)` without overflow.
fn ln1p_exp(z: f64) -> f64 {
    if z > 0.0 { z + (-z).exp().ln_1p() } else { z.exp().ln_1p() }
}

fn ln_cosh(z: f64) -> f64 {
    let a = z.abs();
    a + (-2.0 * a).exp().ln_1p() - LN_2
}

fn gamma_lr(a: f64, x: f64) -> f64 {
    checked_gamma_lr(a, x.max(0.0)).unwrap_or(f64::NAN)
}

fn gamma_ur(a: f64, x: f64) -> f64 {
    checked_gamma_ur(a, x.max(0.0)).unwrap_or(f64::NAN)
}

fn beta_reg(a: f64, b: f64, x: f64) -> f64 {
    checked_beta_reg(a, b, x.clamp(0.0, 1.0)).unwrap_or(f64::NAN)
}

fn ln_beta(a: f64, b: f64) -> f64 {
    checked_ln_beta(a, b).unwrap_or(f64::NAN)
}

// Families backed by statrs distributions.

fn cauchy(z: f64, _: &[f64]) -> f64 {
    Cauchy::new(0.0, 1.0).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn cauchy_cdf(z: f64, _: &[f64]) -> f64 {
    0.5 + z.atan() / PI
}

fn chi(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    Chi::new(s[0]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn chi_cdf(z: f64, s: &[f64]) -> f64 {
    Chi::new(s[0]).map_or(f64::NAN, |d| d.cdf(z.max(0.0)))
}

fn chi2(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    ChiSquared::new(s[0]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn chi2_cdf(z: f64, s: &[f64]) -> f64 {
    ChiSquared::new(s[0]).map_or(f64::NAN, |d| d.cdf(z.max(0.0)))
}

fn gamma(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    Gamma::new(s[0], 1.0).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn gamma_cdf(z: f64, s: &[f64]) -> f64 {
    Gamma::new(s[0], 1.0).map_or(f64::NAN, |d| d.cdf(z.max(0.0)))
}

fn lognorm(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    LogNormal::new(0.0, s[0]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn lognorm_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    LogNormal::new(0.0, s[0]).map_or(f64::NAN, |d| d.cdf(z))
}

fn beta(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 || z >= 1.0 {
        return NEG_INF;
    }
    Beta::new(s[0], s[1]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn beta_cdf(z: f64, s: &[f64]) -> f64 {
    Beta::new(s[0], s[1]).map_or(f64::NAN, |d| d.cdf(z.clamp(0.0, 1.0)))
}

fn weibull_min(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    Weibull::new(s[0], 1.0).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn weibull_min_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    -(-z.powf(s[0])).exp_m1()
}

fn student_t(z: f64, s: &[f64]) -> f64 {
    StudentsT::new(0.0, 1.0, s[0]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn student_t_cdf(z: f64, s: &[f64]) -> f64 {
    StudentsT::new(0.0, 1.0, s[0]).map_or(f64::NAN, |d| d.cdf(z))
}

fn invgamma(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    InverseGamma::new(s[0], 1.0).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn invgamma_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    gamma_ur(s[0], 1.0 / z)
}

fn f_dist(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    FisherSnedecor::new(s[0], s[1]).map_or(NEG_INF, |d| d.ln_pdf(z))
}

fn f_dist_cdf(z: f64, s: &[f64]) -> f64 {
    FisherSnedecor::new(s[0], s[1]).map_or(f64::NAN, |d| d.cdf(z.max(0.0)))
}

// Closed-form families.

fn norm(z: f64, _: &[f64]) -> f64 {
    ln_phi(z)
}

fn norm_cdf(z: f64, _: &[f64]) -> f64 {
    phi_cdf(z)
}

fn expon(z: f64, _: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { -z }
}

fn expon_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { -(-z).exp_m1() }
}

fn uniform(z: f64, _: &[f64]) -> f64 {
    if (0.0..=1.0).contains(&z) { 0.0 } else { NEG_INF }
}

fn uniform_cdf(z: f64, _: &[f64]) -> f64 {
    z.clamp(0.0, 1.0)
}

fn exponpow(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let b = s[0];
    let zb = z.powf(b);
    b.ln() + (b - 1.0) * z.ln() + 1.0 + zb - zb.exp()
}

fn exponpow_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    // 1 - exp(1 - exp(z^b))
    let u = -z.powf(s[0]).exp_m1();
    -u.exp_m1()
}

fn powerlaw(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 || z > 1.0 {
        return NEG_INF;
    }
    s[0].ln() + (s[0] - 1.0) * z.ln()
}

fn powerlaw_cdf(z: f64, s: &[f64]) -> f64 {
    z.clamp(0.0, 1.0).powf(s[0])
}

fn rayleigh(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { NEG_INF } else { z.ln() - 0.5 * z * z }
}

fn rayleigh_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { -(-0.5 * z * z).exp_m1() }
}

fn weibull_max(z: f64, s: &[f64]) -> f64 {
    if z >= 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    let w = -z;
    c.ln() + (c - 1.0) * w.ln() - w.powf(c)
}

fn weibull_max_cdf(z: f64, s: &[f64]) -> f64 {
    if z >= 0.0 { 1.0 } else { (-(-z).powf(s[0])).exp() }
}

fn laplace(z: f64, _: &[f64]) -> f64 {
    -LN_2 - z.abs()
}

fn laplace_cdf(z: f64, _: &[f64]) -> f64 {
    if z < 0.0 { 0.5 * z.exp() } else { 1.0 - 0.5 * (-z).exp() }
}

fn logistic(z: f64, _: &[f64]) -> f64 {
    let a = z.abs();
    -a - 2.0 * (-a).exp().ln_1p()
}

fn logistic_cdf(z: f64, _: &[f64]) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn gumbel_r(z: f64, _: &[f64]) -> f64 {
    -(z + (-z).exp())
}

fn gumbel_r_cdf(z: f64, _: &[f64]) -> f64 {
    (-(-z).exp()).exp()
}

fn gumbel_l(z: f64, _: &[f64]) -> f64 {
    z - z.exp()
}

fn gumbel_l_cdf(z: f64, _: &[f64]) -> f64 {
    -(-z.exp()).exp_m1()
}

fn maxwell(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    0.5 * FRAC_2_PI.ln() + 2.0 * z.ln() - 0.5 * z * z
}

fn maxwell_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    erf(z / SQRT_2) - FRAC_2_PI.sqrt() * z * (-0.5 * z * z).exp()
}

fn halfnorm(z: f64, _: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { 0.5 * FRAC_2_PI.ln() - 0.5 * z * z }
}

fn halfnorm_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { erf(z / SQRT_2) }
}

fn halfcauchy(z: f64, _: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { FRAC_2_PI.ln() - (z * z).ln_1p() }
}

fn halfcauchy_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { FRAC_2_PI * z.atan() }
}

fn halflogistic(z: f64, _: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { LN_2 - z - 2.0 * (-z).exp().ln_1p() }
}

fn halflogistic_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { (0.5 * z).tanh() }
}

fn pareto(z: f64, s: &[f64]) -> f64 {
    if z < 1.0 { NEG_INF } else { s[0].ln() - (s[0] + 1.0) * z.ln() }
}

fn pareto_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 1.0 { 0.0 } else { 1.0 - z.powf(-s[0]) }
}

fn levy(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { NEG_INF } else { -LN_SQRT_2PI - 1.5 * z.ln() - 0.5 / z }
}

fn levy_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { erfc(1.0 / (2.0 * z).sqrt()) }
}

fn levy_l(z: f64, s: &[f64]) -> f64 {
    levy(-z, s)
}

fn levy_l_cdf(z: f64, _: &[f64]) -> f64 {
    if z >= 0.0 { 1.0 } else { erf(1.0 / (-2.0 * z).sqrt()) }
}

fn lomax(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { s[0].ln() - (s[0] + 1.0) * z.ln_1p() }
}

fn lomax_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { -(-s[0] * z.ln_1p()).exp_m1() }
}

fn fisk(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    c.ln() + (c - 1.0) * z.ln() - 2.0 * z.powf(c).ln_1p()
}

fn fisk_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { 1.0 / (1.0 + z.powf(-s[0])) }
}

fn genextreme(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    if c.abs() < ZERO_SHAPE {
        return gumbel_r(z, s);
    }
    let t = 1.0 - c * z;
    if t <= 0.0 {
        return NEG_INF;
    }
    (1.0 / c - 1.0) * t.ln() - t.powf(1.0 / c)
}

fn genextreme_cdf(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    if c.abs() < ZERO_SHAPE {
        return gumbel_r_cdf(z, s);
    }
    let t = 1.0 - c * z;
    if t <= 0.0 {
        return if c > 0.0 { 1.0 } else { 0.0 };
    }
    (-t.powf(1.0 / c)).exp()
}

fn hypsecant(z: f64, _: &[f64]) -> f64 {
    -LN_PI - ln_cosh(z)
}

fn hypsecant_cdf(z: f64, _: &[f64]) -> f64 {
    FRAC_2_PI * z.exp().atan()
}

fn gilbrat(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let l = z.ln();
    -LN_SQRT_2PI - l - 0.5 * l * l
}

fn gilbrat_cdf(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { phi_cdf(z.ln()) }
}

fn moyal(z: f64, _: &[f64]) -> f64 {
    -0.5 * (z + (-z).exp()) - LN_SQRT_2PI
}

fn moyal_cdf(z: f64, _: &[f64]) -> f64 {
    erfc((-0.5 * z).exp() / SQRT_2)
}

fn semicircular(z: f64, _: &[f64]) -> f64 {
    if z.abs() >= 1.0 { NEG_INF } else { FRAC_2_PI.ln() + 0.5 * (1.0 - z * z).ln() }
}

fn semicircular_cdf(z: f64, _: &[f64]) -> f64 {
    let z = z.clamp(-1.0, 1.0);
    0.5 + (z * (1.0 - z * z).sqrt() + z.asin()) / PI
}

fn anglit(z: f64, _: &[f64]) -> f64 {
    if z.abs() > FRAC_PI_4 { NEG_INF } else { (2.0 * z).cos().ln() }
}

fn anglit_cdf(z: f64, _: &[f64]) -> f64 {
    let z = z.clamp(-FRAC_PI_4, FRAC_PI_4);
    (z + FRAC_PI_4).sin().powi(2)
}

fn cosine(z: f64, _: &[f64]) -> f64 {
    if z.abs() > PI { NEG_INF } else { (1.0 + z.cos()).ln() - (2.0 * PI).ln() }
}

fn cosine_cdf(z: f64, _: &[f64]) -> f64 {
    let z = z.clamp(-PI, PI);
    (PI + z + z.sin()) / (2.0 * PI)
}

fn arcsine(z: f64, _: &[f64]) -> f64 {
    if z <= 0.0 || z >= 1.0 { NEG_INF } else { -LN_PI - 0.5 * (z * (1.0 - z)).ln() }
}

fn arcsine_cdf(z: f64, _: &[f64]) -> f64 {
    FRAC_2_PI * z.clamp(0.0, 1.0).sqrt().asin()
}

fn triang(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    if !(0.0..=1.0).contains(&z) {
        return NEG_INF;
    }
    if z < c { LN_2 + z.ln() - c.ln() } else { LN_2 + (1.0 - z).ln() - (1.0 - c).ln() }
}

fn triang_cdf(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    let z = z.clamp(0.0, 1.0);
    if z < c { z * z / c } else { 1.0 - (1.0 - z).powi(2) / (1.0 - c) }
}

fn gompertz(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 { NEG_INF } else { s[0].ln() + z - s[0] * z.exp_m1() }
}

fn gompertz_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { -(-s[0] * z.exp_m1()).exp_m1() }
}

fn invgauss(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let mu = s[0];
    -LN_SQRT_2PI - 1.5 * z.ln() - (z - mu).powi(2) / (2.0 * z * mu * mu)
}

fn invgauss_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let mu = s[0];
    let sq = z.sqrt();
    phi_cdf((z / mu - 1.0) / sq) + (2.0 / mu).exp() * phi_cdf(-(z / mu + 1.0) / sq)
}

fn wald(z: f64, _: &[f64]) -> f64 {
    invgauss(z, &[1.0])
}

fn wald_cdf(z: f64, _: &[f64]) -> f64 {
    invgauss_cdf(z, &[1.0])
}

fn nakagami(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let nu = s[0];
    LN_2 + nu * nu.ln() - ln_gamma(nu) + (2.0 * nu - 1.0) * z.ln() - nu * z * z
}

fn nakagami_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { gamma_lr(s[0], s[0] * z * z) }
}

fn loggamma(z: f64, s: &[f64]) -> f64 {
    s[0] * z - z.exp() - ln_gamma(s[0])
}

fn loggamma_cdf(z: f64, s: &[f64]) -> f64 {
    gamma_lr(s[0], z.exp())
}

fn dgamma(z: f64, s: &[f64]) -> f64 {
    let a = s[0];
    let w = z.abs();
    -LN_2 - ln_gamma(a) + (a - 1.0) * w.ln() - w
}

fn dgamma_cdf(z: f64, s: &[f64]) -> f64 {
    if z >= 0.0 { 0.5 + 0.5 * gamma_lr(s[0], z) } else { 0.5 * gamma_ur(s[0], -z) }
}

fn dweibull(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    let w = z.abs();
    (0.5 * c).ln() + (c - 1.0) * w.ln() - w.powf(c)
}

fn dweibull_cdf(z: f64, s: &[f64]) -> f64 {
    let half_tail = 0.5 * (-z.abs().powf(s[0])).exp();
    if z >= 0.0 { 1.0 - half_tail } else { half_tail }
}

fn genlogistic(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    if z >= 0.0 {
        c.ln() - z - (c + 1.0) * (-z).exp().ln_1p()
    } else {
        c.ln() + c * z - (c + 1.0) * z.exp().ln_1p()
    }
}

fn genlogistic_cdf(z: f64, s: &[f64]) -> f64 {
    (-s[0] * ln1p_exp(-z)).exp()
}

fn gennorm(z: f64, s: &[f64]) -> f64 {
    let b = s[0];
    b.ln() - LN_2 - ln_gamma(1.0 / b) - z.abs().powf(b)
}

fn gennorm_cdf(z: f64, s: &[f64]) -> f64 {
    let b = s[0];
    let half = 0.5 * gamma_lr(1.0 / b, z.abs().powf(b));
    if z >= 0.0 { 0.5 + half } else { 0.5 - half }
}

fn halfgennorm(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 {
        return NEG_INF;
    }
    let b = s[0];
    b.ln() - ln_gamma(1.0 / b) - z.powf(b)
}

fn halfgennorm_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { gamma_lr(1.0 / s[0], z.powf(s[0])) }
}

fn skewnorm(z: f64, s: &[f64]) -> f64 {
    LN_2 + ln_phi(z) + ln_phi_cdf(s[0] * z)
}

fn powernorm(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    c.ln() + ln_phi(z) + (c - 1.0) * ln_phi_cdf(-z)
}

fn powernorm_cdf(z: f64, s: &[f64]) -> f64 {
    1.0 - phi_cdf(-z).powf(s[0])
}

fn exponweib(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (a, c) = (s[0], s[1]);
    let zc = z.powf(c);
    a.ln() + c.ln() + (a - 1.0) * (-(-zc).exp_m1()).ln() - zc + (c - 1.0) * z.ln()
}

fn exponweib_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { (-(-z.powf(s[1])).exp_m1()).powf(s[0]) }
}

fn burr(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (c, d) = (s[0], s[1]);
    c.ln() + d.ln() - (c + 1.0) * z.ln() - (d + 1.0) * z.powf(-c).ln_1p()
}

fn burr_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { (-s[1] * z.powf(-s[0]).ln_1p()).exp() }
}

fn burr12(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (c, d) = (s[0], s[1]);
    c.ln() + d.ln() + (c - 1.0) * z.ln() - (d + 1.0) * z.powf(c).ln_1p()
}

fn burr12_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { -(-s[1] * z.powf(s[0]).ln_1p()).exp_m1() }
}

fn betaprime(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (a, b) = (s[0], s[1]);
    (a - 1.0) * z.ln() - (a + b) * z.ln_1p() - ln_beta(a, b)
}

fn betaprime_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { beta_reg(s[0], s[1], z / (1.0 + z)) }
}

fn genpareto(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    if c.abs() < ZERO_SHAPE {
        return -z;
    }
    let t = c * z;
    if t <= -1.0 { NEG_INF } else { -(1.0 + 1.0 / c) * t.ln_1p() }
}

fn genpareto_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let c = s[0];
    if c.abs() < ZERO_SHAPE {
        return -(-z).exp_m1();
    }
    let t = c * z;
    if t <= -1.0 { 1.0 } else { -(-t.ln_1p() / c).exp_m1() }
}

fn foldnorm(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    ln_phi(z - c) + (-2.0 * c * z).exp().ln_1p()
}

fn foldnorm_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let c = s[0];
    0.5 * (erf((z - c) / SQRT_2) + erf((z + c) / SQRT_2))
}

fn foldcauchy(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    (1.0 / (PI * (1.0 + (z - c).powi(2))) + 1.0 / (PI * (1.0 + (z + c).powi(2)))).ln()
}

fn foldcauchy_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { ((z - s[0]).atan() + (z + s[0]).atan()) / PI }
}

fn loglaplace(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    if z < 1.0 { (0.5 * c).ln() + (c - 1.0) * z.ln() } else { (0.5 * c).ln() - (c + 1.0) * z.ln() }
}

fn loglaplace_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        0.0
    } else if z < 1.0 {
        0.5 * z.powf(s[0])
    } else {
        1.0 - 0.5 * z.powf(-s[0])
    }
}

fn bradford(z: f64, s: &[f64]) -> f64 {
    if !(0.0..=1.0).contains(&z) {
        return NEG_INF;
    }
    let c = s[0];
    c.ln() - c.ln_1p().ln() - (c * z).ln_1p()
}

fn bradford_cdf(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    (c * z.clamp(0.0, 1.0)).ln_1p() / c.ln_1p()
}

fn johnsonsu(z: f64, s: &[f64]) -> f64 {
    let (a, b) = (s[0], s[1]);
    b.ln() - 0.5 * (z * z).ln_1p() + ln_phi(a + b * z.asinh())
}

fn johnsonsu_cdf(z: f64, s: &[f64]) -> f64 {
    phi_cdf(s[0] + s[1] * z.asinh())
}

fn johnsonsb(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 || z >= 1.0 {
        return NEG_INF;
    }
    let (a, b) = (s[0], s[1]);
    b.ln() - (z * (1.0 - z)).ln() + ln_phi(a + b * (z / (1.0 - z)).ln())
}

fn johnsonsb_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        0.0
    } else if z >= 1.0 {
        1.0
    } else {
        phi_cdf(s[0] + s[1] * (z / (1.0 - z)).ln())
    }
}

fn exponnorm(z: f64, s: &[f64]) -> f64 {
    let k = s[0];
    let inv = 1.0 / k;
    -(2.0 * k).ln() + 0.5 * inv * inv - z * inv + erfc(-(z - inv) / SQRT_2).ln()
}

fn exponnorm_cdf(z: f64, s: &[f64]) -> f64 {
    let inv = 1.0 / s[0];
    phi_cdf(z) - (0.5 * inv * inv - z * inv).exp() * phi_cdf(z - inv)
}

fn recipinvgauss(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let mu = s[0];
    -0.5 * (2.0 * PI * z).ln() - (1.0 - mu * z).powi(2) / (2.0 * z * mu * mu)
}

fn fatiguelife(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    (z + 1.0).ln() - (2.0 * c).ln() - 0.5 * (2.0 * PI * z.powi(3)).ln()
        - (z - 1.0).powi(2) / (2.0 * z * c * c)
}

fn fatiguelife_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let sq = z.sqrt();
    phi_cdf((sq - 1.0 / sq) / s[0])
}

fn invweibull(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let c = s[0];
    c.ln() - (c + 1.0) * z.ln() - z.powf(-c)
}

fn invweibull_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { (-z.powf(-s[0])).exp() }
}

fn mielke(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (k, sh) = (s[0], s[1]);
    k.ln() + (k - 1.0) * z.ln() - (1.0 + k / sh) * z.powf(sh).ln_1p()
}

fn mielke_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let (k, sh) = (s[0], s[1]);
    (k * z.ln() - (k / sh) * z.powf(sh).ln_1p()).exp()
}

fn genhalflogistic(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    if z < 0.0 || z > 1.0 / c {
        return NEG_INF;
    }
    let t = 1.0 - c * z;
    LN_2 + (1.0 / c - 1.0) * t.ln() - 2.0 * t.powf(1.0 / c).ln_1p()
}

fn genhalflogistic_cdf(z: f64, s: &[f64]) -> f64 {
    let c = s[0];
    let t = (1.0 - c * z.max(0.0)).max(0.0);
    let u = t.powf(1.0 / c);
    (1.0 - u) / (1.0 + u)
}

fn truncexpon(z: f64, s: &[f64]) -> f64 {
    let b = s[0];
    if z < 0.0 || z > b {
        return NEG_INF;
    }
    -z - (-(-b).exp_m1()).ln()
}

fn truncexpon_cdf(z: f64, s: &[f64]) -> f64 {
    let b = s[0];
    let z = z.clamp(0.0, b);
    (-z).exp_m1() / (-b).exp_m1()
}

fn alpha(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let a = s[0];
    -2.0 * z.ln() - ln_phi_cdf(a) - LN_SQRT_2PI - 0.5 * (a - 1.0 / z).powi(2)
}

fn alpha_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { phi_cdf(s[0] - 1.0 / z) / phi_cdf(s[0]) }
}

fn kappa3(z: f64, s: &[f64]) -> f64 {
    if z < 0.0 {
        return NEG_INF;
    }
    let a = s[0];
    a.ln() - ((a + 1.0) / a) * (a + z.powf(a)).ln()
}

fn kappa3_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let a = s[0];
    z * (a + z.powf(a)).powf(-1.0 / a)
}

fn powerlognorm(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (c, sh) = (s[0], s[1]);
    let l = z.ln() / sh;
    c.ln() - (z * sh).ln() + ln_phi(l) + (c - 1.0) * ln_phi_cdf(-l)
}

fn powerlognorm_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { 1.0 - phi_cdf(-z.ln() / s[1]).powf(s[0]) }
}

fn gengamma(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 {
        return NEG_INF;
    }
    let (a, c) = (s[0], s[1]);
    c.ln() + (c * a - 1.0) * z.ln() - z.powf(c) - ln_gamma(a)
}

fn gengamma_cdf(z: f64, s: &[f64]) -> f64 {
    if z <= 0.0 { 0.0 } else { gamma_lr(s[0], z.powf(s[1])) }
}

fn rdist(z: f64, s: &[f64]) -> f64 {
    if z.abs() >= 1.0 {
        return NEG_INF;
    }
    let c = s[0];
    (0.5 * c - 1.0) * (1.0 - z * z).ln() - ln_beta(0.5, 0.5 * c)
}

fn rdist_cdf(z: f64, s: &[f64]) -> f64 {
    let z = z.clamp(-1.0, 1.0);
    let half = 0.5 * beta_reg(0.5, 0.5 * s[0], z * z);
    if z >= 0.0 { 0.5 + half } else { 0.5 - half }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trapezoidal integral of the standardized density over `[lo, hi]`.
    fn integrate(d: &Density, shapes: &[f64], lo: f64, hi: f64) -> f64 {
        let n = 200_000;
        let h = (hi - lo) / n as f64;
        let mut acc = 0.0;
        for i in 0..=n {
            let z = lo + h * i as f64;
            let w = if i == 0 || i == n { 0.5 } else { 1.0 };
            acc += w * d.ln_pdf_standard(z, shapes).exp();
        }
        acc * h
    }

    #[test]
    fn every_density_has_matching_initial_shapes() {
        for d in DENSITIES {
            assert_eq!(d.shapes.len(), d.initial.len(), "{}", d.id);
            assert!(d.accepts_shapes(d.initial), "{} initial shapes out of domain", d.id);
        }
    }

    #[test]
    fn densities_are_sorted_and_unique() {
        for pair in DENSITIES.windows(2) {
            assert!(pair[0].id < pair[1].id, "{} !< {}", pair[0].id, pair[1].id);
        }
    }

    #[test]
    fn common_densities_integrate_to_one() {
        let cases: [(&str, &[f64], f64, f64); 8] = [
            ("norm", &[], -12.0, 12.0),
            ("expon", &[], 0.0, 40.0),
            ("gamma", &[2.5], 0.0, 60.0),
            ("lognorm", &[0.5], 1e-9, 30.0),
            ("rayleigh", &[], 0.0, 20.0),
            ("exponpow", &[2.0], 1e-9, 5.0),
            ("powerlaw", &[3.0], 0.0, 1.0),
            ("chi2", &[4.0], 1e-9, 80.0),
        ];
        for (id, shapes, lo, hi) in cases {
            let d = density(id).unwrap();
            let total = integrate(d, shapes, lo, hi);
            assert!((total - 1.0).abs() < 1e-3, "{id} integrates to {total}");
        }
    }

    #[test]
    fn cdf_matches_integrated_density() {
        let cases: [(&str, &[f64], f64, f64); 6] = [
            ("gumbel_r", &[], -10.0, 0.7),
            ("logistic", &[], -40.0, -0.3),
            ("weibull_min", &[1.7], 0.0, 1.2),
            ("fisk", &[3.0], 0.0, 0.8),
            ("genextreme", &[0.3], -8.0, 0.5),
            ("triang", &[0.3], 0.0, 0.6),
        ];
        for (id, shapes, lo, x) in cases {
            let d = density(id).unwrap();
            let numeric = integrate(d, shapes, lo, x);
            let closed = d.cdf(x, shapes, 0.0, 1.0).unwrap();
            assert!((numeric - closed).abs() < 1e-3, "{id}: {numeric} vs {closed}");
        }
    }

    #[test]
    fn loc_scale_shift_the_density() {
        let d = density("norm").unwrap();
        let standard = d.pdf(0.0, &[], 0.0, 1.0);
        let shifted = d.pdf(10.0, &[], 10.0, 2.0);
        assert!((shifted - standard / 2.0).abs() < 1e-12);
    }

    #[test]
    fn outside_support_is_negative_infinity() {
        let d = density("expon").unwrap();
        assert_eq!(d.ln_pdf(-1.0, &[], 0.0, 1.0), f64::NEG_INFINITY);
        let d = density("uniform").unwrap();
        assert_eq!(d.ln_pdf(1.5, &[], 0.0, 1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn singularities_are_treated_as_infeasible() {
        // dgamma with a < 1 has an infinite density at 0.
        let d = density("dgamma").unwrap();
        assert_eq!(d.ln_pdf_standard(0.0, &[0.5]), f64::NEG_INFINITY);
    }

    #[test]
    fn unknown_and_unsupported_ids_have_no_density() {
        assert!(density("levy_stable").is_none());
        assert!(density("not-a-distribution").is_none());
    }
}
