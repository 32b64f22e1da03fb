//! Static catalog of continuous distribution identifiers.
//!
//! Each entry carries the distribution's shape parameter names in canonical
//! order; every distribution additionally has `loc` and `scale`. Identifiers
//! and signatures follow `scipy.stats`, which is what most users of a
//! distribution fitter already know.
//!
//! Not every identifier has an in-crate density. Those that do not are still
//! valid candidates; they simply fail to fit and are skipped by the engine.

use crate::error::FitError;
use crate::models::{self, Density};

/// A catalog entry: identifier plus shape parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub shapes: &'static [&'static str],
}

impl CatalogEntry {
    /// Canonical parameter names: shapes, then `loc`, then `scale`.
    pub fn param_names(&self) -> Vec<&'static str> {
        let mut names = self.shapes.to_vec();
        names.push("loc");
        names.push("scale");
        names
    }

    /// In-crate density, if this distribution can be fitted.
    pub fn density(&self) -> Option<&'static Density> {
        models::density(self.id)
    }

    pub fn docs_url(&self) -> String {
        docs_url(self.id)
    }
}

/// Ten widely used distributions offered as the default candidate set.
pub const COMMON: [&str; 10] = [
    "cauchy", "chi2", "expon", "exponpow", "gamma", "lognorm", "norm", "powerlaw", "rayleigh",
    "uniform",
];

const fn entry(id: &'static str, shapes: &'static [&'static str]) -> CatalogEntry {
    CatalogEntry { id, shapes }
}

static CATALOG: &[CatalogEntry] = &[
    entry("alpha", &["a"]),
    entry("anglit", &[]),
    entry("arcsine", &[]),
    entry("argus", &["chi"]),
    entry("beta", &["a", "b"]),
    entry("betaprime", &["a", "b"]),
    entry("bradford", &["c"]),
    entry("burr", &["c", "d"]),
    entry("burr12", &["c", "d"]),
    entry("cauchy", &[]),
    entry("chi", &["df"]),
    entry("chi2", &["df"]),
    entry("cosine", &[]),
    entry("crystalball", &["beta", "m"]),
    entry("dgamma", &["a"]),
    entry("dweibull", &["c"]),
    entry("erlang", &["a"]),
    entry("expon", &[]),
    entry("exponnorm", &["K"]),
    entry("exponpow", &["b"]),
    entry("exponweib", &["a", "c"]),
    entry("f", &["dfn", "dfd"]),
    entry("fatiguelife", &["c"]),
    entry("fisk", &["c"]),
    entry("foldcauchy", &["c"]),
    entry("foldnorm", &["c"]),
    entry("frechet_l", &["c"]),
    entry("frechet_r", &["c"]),
    entry("gamma", &["a"]),
    entry("gausshyper", &["a", "b", "c", "z"]),
    entry("genexpon", &["a", "b", "c"]),
    entry("genextreme", &["c"]),
    entry("gengamma", &["a", "c"]),
    entry("genhalflogistic", &["c"]),
    entry("geninvgauss", &["p", "b"]),
    entry("genlogistic", &["c"]),
    entry("gennorm", &["beta"]),
    entry("genpareto", &["c"]),
    entry("gilbrat", &[]),
    entry("gompertz", &["c"]),
    entry("gumbel_l", &[]),
    entry("gumbel_r", &[]),
    entry("halfcauchy", &[]),
    entry("halfgennorm", &["beta"]),
    entry("halflogistic", &[]),
    entry("halfnorm", &[]),
    entry("hypsecant", &[]),
    entry("invgamma", &["a"]),
    entry("invgauss", &["mu"]),
    entry("invweibull", &["c"]),
    entry("johnsonsb", &["a", "b"]),
    entry("johnsonsu", &["a", "b"]),
    entry("kappa3", &["a"]),
    entry("kappa4", &["h", "k"]),
    entry("ksone", &["n"]),
    entry("kstwo", &["n"]),
    entry("kstwobign", &[]),
    entry("laplace", &[]),
    entry("levy", &[]),
    entry("levy_l", &[]),
    entry("levy_stable", &["alpha", "beta"]),
    entry("loggamma", &["c"]),
    entry("logistic", &[]),
    entry("loglaplace", &["c"]),
    entry("lognorm", &["s"]),
    entry("loguniform", &["a", "b"]),
    entry("lomax", &["c"]),
    entry("maxwell", &[]),
    entry("mielke", &["k", "s"]),
    entry("moyal", &[]),
    entry("nakagami", &["nu"]),
    entry("ncf", &["dfn", "dfd", "nc"]),
    entry("nct", &["df", "nc"]),
    entry("ncx2", &["df", "nc"]),
    entry("norm", &[]),
    entry("norminvgauss", &["a", "b"]),
    entry("pareto", &["b"]),
    entry("pearson3", &["skew"]),
    entry("powerlaw", &["a"]),
    entry("powerlognorm", &["c", "s"]),
    entry("powernorm", &["c"]),
    entry("rayleigh", &[]),
    entry("rdist", &["c"]),
    entry("recipinvgauss", &["mu"]),
    entry("reciprocal", &["a", "b"]),
    entry("rice", &["b"]),
    entry("semicircular", &[]),
    entry("skewnorm", &["a"]),
    entry("t", &["df"]),
    entry("trapz", &["c", "d"]),
    entry("triang", &["c"]),
    entry("truncexpon", &["b"]),
    entry("truncnorm", &["a", "b"]),
    entry("tukeylambda", &["lam"]),
    entry("uniform", &[]),
    entry("vonmises", &["kappa"]),
    entry("vonmises_line", &["kappa"]),
    entry("wald", &[]),
    entry("weibull_max", &["c"]),
    entry("weibull_min", &["c"]),
    entry("wrapcauchy", &["c"]),
];

/// All catalog entries in alphabetical order.
pub fn all() -> &'static [CatalogEntry] {
    CATALOG
}

/// Find an entry by identifier.
pub fn lookup(id: &str) -> Result<&'static CatalogEntry, FitError> {
    CATALOG
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| FitError::UnknownDistribution(id.to_string()))
}

/// Canonical parameter names for an identifier.
pub fn param_names(id: &str) -> Result<Vec<&'static str>, FitError> {
    lookup(id).map(CatalogEntry::param_names)
}

/// Fittable density for an identifier; `None` when unknown or not fittable.
pub fn density(id: &str) -> Option<&'static Density> {
    lookup(id).ok().and_then(CatalogEntry::density)
}

const SCIPY_DOCS: &str = "https://docs.scipy.org/doc/scipy/reference/generated/scipy.stats";

/// Identifiers whose documentation lives under a different (current) name.
static DOCS_ALIASES: &[(&str, &str)] = &[
    ("frechet_r", "weibull_min"),
    ("frechet_l", "weibull_max"),
    ("reciprocal", "loguniform"),
    ("gilbrat", "gibrat"),
    ("trapz", "trapezoid"),
];

/// Documentation URL for an identifier.
pub fn docs_url(id: &str) -> String {
    let page = DOCS_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == id)
        .map_or(id, |&(_, current)| current);
    format!("{SCIPY_DOCS}.{page}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_unique() {
        for pair in CATALOG.windows(2) {
            assert!(pair[0].id < pair[1].id, "{} !< {}", pair[0].id, pair[1].id);
        }
        assert!(CATALOG.len() >= 100);
    }

    #[test]
    fn common_distributions_are_cataloged_and_fittable() {
        for id in COMMON {
            let entry = lookup(id).unwrap();
            assert!(entry.density().is_some(), "{id} should have a density");
        }
    }

    #[test]
    fn param_names_end_with_loc_scale() {
        assert_eq!(param_names("gamma").unwrap(), vec!["a", "loc", "scale"]);
        assert_eq!(param_names("norm").unwrap(), vec!["loc", "scale"]);
        assert_eq!(
            param_names("nonexistent"),
            Err(FitError::UnknownDistribution("nonexistent".to_string()))
        );
    }

    #[test]
    fn density_lookup_distinguishes_unsupported() {
        assert!(density("gamma").is_some());
        assert!(density("kappa4").is_none());
        assert!(density("nonexistent").is_none());
    }

    #[test]
    fn docs_url_maps_legacy_names() {
        assert_eq!(
            docs_url("frechet_r"),
            "https://docs.scipy.org/doc/scipy/reference/generated/scipy.stats.weibull_min.html"
        );
        assert_eq!(
            docs_url("norm"),
            "https://docs.scipy.org/doc/scipy/reference/generated/scipy.stats.norm.html"
        );
    }

    #[test]
    fn every_density_belongs_to_a_catalog_entry() {
        for id in crate::models::density_ids() {
            assert!(lookup(id).is_ok(), "{id} missing from catalog");
        }
    }
}
