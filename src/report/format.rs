//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized (important for snapshot-style tests)

use crate::catalog::{self, CatalogEntry};
use crate::domain::FitResult;
use crate::fit::FitSelection;
use crate::io::ingest::{Dtype, SampleLoad, Table};
use crate::report::describe::ColumnSummary;

/// One-line overview of the loaded sample.
pub fn format_sample_header(path: &str, load: &SampleLoad) -> String {
    let mut out = format!(
        "=== distfit ===\nFile: {path}\nColumn: {} | n={}",
        load.column,
        load.sample.len()
    );
    if load.dropped > 0 {
        out.push_str(&format!(" (dropped {} empty/non-finite)", load.dropped));
    }
    out.push('\n');
    out
}

/// Ranked table of the first `top_n` fits.
pub fn format_summary(selection: &FitSelection, top_n: usize) -> String {
    let rows = selection.summary(top_n);
    let mut out = format!(
        "Top {} of {} fitted (ranked by {}):\n",
        rows.len(),
        selection.ranking.len(),
        selection.ranking.metric().column_name()
    );
    out.push_str(&format_fit_table(rows));
    out
}

fn format_fit_table(rows: &[FitResult]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<16} {:>14} {:>14} {:>14} {:>12} {:>10}\n",
            "rank", "distribution", "sumsquare_error", "aic", "bic", "kl_div", "ks_pvalue"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<16} {:-<14} {:-<14} {:-<14} {:-<12} {:-<10}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, r) in rows.iter().enumerate() {
        let q = &r.quality;
        out.push_str(
            format!(
                "{:>4} {:<16} {:>14} {:>14} {:>14} {:>12} {:>10}\n",
                i + 1,
                truncate(&r.distribution, 16),
                fmt_num(q.sumsquare_error),
                fmt_num(q.aic),
                fmt_num(q.bic),
                fmt_num(q.kl_div),
                q.ks_pvalue.map(|p| format!("{p:.4}")).unwrap_or_else(|| "-".to_string()),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Best distribution with its parameters and documentation link.
pub fn format_best(selection: &FitSelection) -> String {
    let best = &selection.best;
    let mut out = format!("Best fit: {}\n", best.distribution);
    let width = best.params.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for p in &best.params {
        out.push_str(&format!("  {:<width$} = {}\n", p.name, fmt_num(p.value)));
    }
    if let Some(d) = best.quality.ks_statistic {
        out.push_str(&format!("  KS statistic = {d:.4}"));
        if let Some(p) = best.quality.ks_pvalue {
            out.push_str(&format!(" (p = {p:.4})"));
        }
        out.push('\n');
    }
    out.push_str(&format!("Docs: {}\n", catalog::docs_url(&best.distribution)));
    out
}

/// Candidates that could not be fitted; empty when none were skipped.
pub fn format_skipped(selection: &FitSelection) -> String {
    if selection.skipped.is_empty() {
        return String::new();
    }
    let mut out = format!("Skipped {} candidate(s):\n", selection.skipped.len());
    for (id, reason) in &selection.skipped {
        out.push_str(&format!("  {id:<16} {reason}\n"));
    }
    out
}

pub fn format_dtypes(dtypes: &[(String, Dtype)]) -> String {
    let width = dtypes.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(6).max(6);
    let mut out = format!("{:<width$} dtype\n", "column");
    for (name, dtype) in dtypes {
        out.push_str(&format!("{name:<width$} {dtype}\n"));
    }
    out
}

pub fn format_describe(summaries: &[ColumnSummary]) -> String {
    if summaries.is_empty() {
        return "No numeric columns.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )
        .trim_end(),
    );
    out.push('\n');
    for s in summaries {
        out.push_str(
            format!(
                "{:<16} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
                truncate(&s.name, 16),
                s.count,
                fmt_num(s.mean),
                fmt_num(s.std),
                fmt_num(s.min),
                fmt_num(s.q25),
                fmt_num(s.q50),
                fmt_num(s.q75),
                fmt_num(s.max),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Table overview used by `distfit describe`.
pub fn format_table_overview(path: &str, table: &Table) -> String {
    let (rows, cols) = table.shape();
    let mut out = format!("File: {path}\nShape: {rows} rows x {cols} columns\n");
    if !table.row_errors.is_empty() {
        out.push_str(&format!("Row issues: {}\n", table.row_errors.len()));
        for e in table.row_errors.iter().take(5) {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }
    out
}

/// Catalog listing with parameter names and a fit-support marker.
pub fn format_catalog(entries: &[&CatalogEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<18} {:<28} {}\n", "distribution", "parameters", "fit"));
    for e in entries {
        let supported = if e.density().is_some() { "yes" } else { "no" };
        out.push_str(&format!(
            "{:<18} {:<28} {supported}\n",
            e.id,
            e.param_names().join(", ")
        ));
    }
    out
}

/// Compact number formatting: fixed for ordinary magnitudes, scientific otherwise.
pub fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let a = v.abs();
    if a != 0.0 && !(1e-4..1e6).contains(&a) {
        format!("{v:.4e}")
    } else {
        format!("{v:.6}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
