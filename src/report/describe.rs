//! Descriptive statistics for the numeric columns of a table.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::domain::Sample;
use crate::io::ingest::{Dtype, Table};

/// `count, mean, std, min, 25%, 50%, 75%, max` of one numeric column.
///
/// Statistics are computed over the finite values only; `std` uses the
/// `n - 1` denominator and quantiles interpolate linearly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// Column names with their inferred dtypes, in file order.
pub fn dtypes(table: &Table) -> Vec<(String, Dtype)> {
    table
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.dtype))
        .collect()
}

/// Summaries for every numeric column; non-numeric columns are omitted.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .numeric_columns()
        .filter_map(|c| {
            let (values, _) = c.numeric_values()?;
            Some(summarize(&c.name, &Sample::new(values)))
        })
        .collect()
}

pub fn summarize(name: &str, sample: &Sample) -> ColumnSummary {
    let mut sorted = sample.values().to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnSummary {
        name: name.to_string(),
        count: sorted.len(),
        mean: if sorted.is_empty() { f64::NAN } else { sorted.iter().mean() },
        std: if sorted.len() < 2 { f64::NAN } else { sorted.iter().std_dev() },
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolation quantile of an ascending slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_table;

    #[test]
    fn describes_numeric_columns_only() {
        let table = read_table("a,b,c\n1,x,0.5\n2,y,\n3,z,1.5\n4,w,2.5\n".as_bytes()).unwrap();
        let summary = describe(&table);
        assert_eq!(summary.len(), 2);

        let a = &summary[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.count, 4);
        assert_eq!(a.mean, 2.5);
        assert!((a.std - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!((a.min, a.q25, a.q50, a.q75, a.max), (1.0, 1.75, 2.5, 3.25, 4.0));

        let c = &summary[1];
        assert_eq!(c.count, 3);
        assert_eq!(c.q50, 1.5);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = summarize("x", &Sample::new(vec![3.0]));
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert_eq!(s.q75, 3.0);
    }

    #[test]
    fn dtypes_follow_file_order() {
        let table = read_table("z,a\n1,q\n".as_bytes()).unwrap();
        assert_eq!(
            dtypes(&table),
            vec![("z".to_string(), Dtype::Int64), ("a".to_string(), Dtype::Object)]
        );
    }
}
