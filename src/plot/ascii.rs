//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - histogram bars: `#`
//! - fitted density: `*` line

use crate::domain::FitResult;
use crate::fit::Histogram;
use crate::models;

/// Render a density histogram of `values`, optionally overlaid with a fitted density.
pub fn render_histogram(
    values: &[f64],
    bins: usize,
    width: usize,
    height: usize,
    overlay: Option<&FitResult>,
) -> String {
    let Some(hist) = Histogram::new(values, bins.max(1)) else {
        return "Histogram: no data\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);
    let (x_min, x_max) = hist.range();

    let curve: Option<Vec<f64>> = overlay.and_then(fitted_pdf).map(|pdf| {
        (0..width)
            .map(|col| pdf(column_center(col, width, x_min, x_max)))
            .collect()
    });

    let hist_max = hist.heights.iter().copied().fold(0.0, f64::max);
    let curve_max = curve
        .iter()
        .flatten()
        .copied()
        .filter(|y| y.is_finite())
        .fold(0.0, f64::max)
        .min(2.0 * hist_max);
    let y_max = hist_max.max(curve_max).max(1e-12);

    let mut grid = vec![vec![' '; width]; height];
    draw_bars(&mut grid, &hist, y_max);
    if let Some(curve) = &curve {
        draw_curve(&mut grid, curve, y_max);
    }

    let mut out = format!(
        "Histogram: x=[{x_min:.3}, {x_max:.3}] | density max={y_max:.3} | bins={} | n={}\n",
        hist.bins(),
        values.len()
    );
    if let Some(fit) = overlay {
        out.push_str(&format!("Overlay: {}\n", fit.distribution));
    }
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// The fitted density of `fit` as a closure; `None` for families without one.
fn fitted_pdf(fit: &FitResult) -> Option<impl Fn(f64) -> f64 + '_> {
    let density = models::density(&fit.distribution)?;
    let n = fit.params.len();
    if n < 2 {
        return None;
    }
    let shapes: Vec<f64> = fit.params[..n - 2].iter().map(|p| p.value).collect();
    let loc = fit.params[n - 2].value;
    let scale = fit.params[n - 1].value;
    Some(move |x: f64| density.pdf(x, &shapes, loc, scale))
}

fn column_center(col: usize, width: usize, x_min: f64, x_max: f64) -> f64 {
    x_min + (col as f64 + 0.5) / width as f64 * (x_max - x_min)
}

fn draw_bars(grid: &mut [Vec<char>], hist: &Histogram, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();
    let bins = hist.bins();

    for col in 0..width {
        let bin = (col * bins / width).min(bins - 1);
        if hist.counts[bin] == 0 {
            continue;
        }
        let filled = ((hist.heights[bin] / y_max).min(1.0) * height as f64).round() as usize;
        let filled = filled.clamp(1, height);
        for row in grid.iter_mut().skip(height - filled) {
            row[col] = '#';
        }
    }
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[f64], y_max: f64) {
    let height = grid.len();
    let mut prev = None;
    for (x, &y) in curve.iter().enumerate() {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let yy = map_y(y, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, '*'),
            None => grid[yy][x] = '*',
        }
        prev = Some((x, yy));
    }
}

fn map_y(y: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = (y / y_max).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, FittedParam};

    #[test]
    fn histogram_golden_snapshot_small() {
        let txt = render_histogram(&[0.0, 1.0, 1.0, 2.0], 2, 10, 5, None);
        let expected = concat!(
            "Histogram: x=[0.000, 2.000] | density max=0.750 | bins=2 | n=4\n",
            "     #####\n",
            "     #####\n",
            "     #####\n",
            "##########\n",
            "##########\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn overlay_draws_fitted_density() {
        let fit = FitResult {
            distribution: "uniform".to_string(),
            candidate_index: 0,
            params: vec![
                FittedParam { name: "loc".to_string(), value: 0.0 },
                FittedParam { name: "scale".to_string(), value: 2.0 },
            ],
            quality: FitQuality {
                sumsquare_error: 0.0,
                aic: 0.0,
                bic: 0.0,
                kl_div: 0.0,
                ks_statistic: None,
                ks_pvalue: None,
                log_likelihood: 0.0,
                n: 4,
            },
        };
        let txt = render_histogram(&[0.0, 1.0, 1.0, 2.0], 2, 10, 5, Some(&fit));
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "Overlay: uniform");
        assert_eq!(lines[3], "**********");
        assert_eq!(lines[6], "##########");
    }

    #[test]
    fn empty_sample_renders_placeholder() {
        assert_eq!(render_histogram(&[], 10, 40, 10, None), "Histogram: no data\n");
    }
}
