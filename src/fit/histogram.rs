//! Density-normalized histogram used as the empirical reference for fits.

use serde::Serialize;

/// Equal-width histogram over `[min, max]` with the last bin closed.
///
/// `heights` integrate to 1 over the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` edges.
    pub edges: Vec<f64>,
    pub centers: Vec<f64>,
    pub counts: Vec<usize>,
    pub heights: Vec<f64>,
}

impl Histogram {
    /// Build a histogram; `None` for an empty sample or zero bins.
    ///
    /// A constant sample uses the range `[v - 0.5, v + 0.5]`.
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + i as f64 * width })
            .collect();
        let centers: Vec<f64> = edges.windows(2).map(|e| 0.5 * (e[0] + e[1])).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = ((v - lo) / width).floor();
            let idx = if idx < 0.0 { 0 } else { (idx as usize).min(bins - 1) };
            counts[idx] += 1;
        }

        let norm = values.len() as f64 * width;
        let heights = counts.iter().map(|&c| c as f64 / norm).collect();

        Some(Self {
            edges,
            centers,
            counts,
            heights,
        })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_integrate_to_one() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();
        let h = Histogram::new(&values, 25).unwrap();
        let area: f64 = h.heights.iter().map(|v| v * h.width()).sum();
        assert!((area - 1.0).abs() < 1e-12);
        assert_eq!(h.counts.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let h = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.centers, vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn constant_sample_gets_unit_range() {
        let h = Histogram::new(&[7.0; 4], 2).unwrap();
        assert_eq!(h.range(), (6.5, 7.5));
        assert_eq!(h.counts, vec![0, 4]);
    }

    #[test]
    fn empty_inputs_have_no_histogram() {
        assert!(Histogram::new(&[], 10).is_none());
        assert!(Histogram::new(&[1.0], 0).is_none());
    }
}
