use std::path::PathBuf;

use chrono::NaiveDate;
use distfit::app::pipeline::run_fit;
use distfit::domain::{CandidateMode, FitConfig, Metric, RunConfig};
use distfit::io::best::read_best_json;
use distfit::io::export::{export_summary, read_summary_csv};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Gamma, Normal};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("distfit-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_sample_csv(dir: &PathBuf, values: &[f64]) -> PathBuf {
    let mut body = String::from("id,label,value\n");
    for (i, v) in values.iter().enumerate() {
        body.push_str(&format!("{i},row{i},{v}\n"));
    }
    let path = dir.join("sample.csv");
    std::fs::write(&path, body).unwrap();
    path
}

fn run_config(path: PathBuf, mode: CandidateMode, selection: &[&str], metric: Metric) -> RunConfig {
    RunConfig {
        csv_path: path,
        column: "value".to_string(),
        mode,
        selection: selection.iter().map(|s| s.to_string()).collect(),
        fit: FitConfig {
            metric,
            ..FitConfig::default()
        },
        plot: false,
        plot_width: 80,
        plot_height: 20,
        export_dir: None,
        export_json: None,
    }
}

#[test]
fn common_candidates_on_gamma_sample_export_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let gamma = Gamma::new(3.0, 2.0).unwrap();
    let values: Vec<f64> = (0..600).map(|_| gamma.sample(&mut rng)).collect();

    let dir = temp_dir("gamma");
    let path = write_sample_csv(&dir, &values);
    let run = run_fit(&run_config(path, CandidateMode::Common, &[], Metric::SumsquareError)).unwrap();

    // Summary is bounded by N and sorted ascending.
    let summary = run.selection.summary(5);
    assert_eq!(summary.len(), 5);
    assert!(summary.windows(2).all(|w| w[0].quality.sumsquare_error <= w[1].quality.sumsquare_error));
    let min = run
        .selection
        .ranking
        .rows()
        .iter()
        .map(|r| r.quality.sumsquare_error)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(summary[0].quality.sumsquare_error, min);

    let now = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 30, 45)
        .unwrap();
    let csv = export_summary(&dir.join("out"), &run.selection.ranking, now).unwrap();
    assert!(csv.ends_with("dist_summary_20240601-123045.csv"));

    let records = read_summary_csv(&csv).unwrap();
    assert_eq!(records.len(), run.selection.ranking.len());
    for (record, fit) in records.iter().zip(run.selection.ranking.rows()) {
        assert_eq!(record.distribution, fit.distribution);
        assert_eq!(record.sumsquare_error, fit.quality.sumsquare_error);
        assert_eq!(record.aic, fit.quality.aic);
        assert_eq!(record.bic, fit.quality.bic);
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn metric_change_reorders_without_changing_rows() {
    let mut rng = StdRng::seed_from_u64(11);
    let normal = Normal::new(10.0, 2.0).unwrap();
    let values: Vec<f64> = (0..400).map(|_| normal.sample(&mut rng)).collect();

    let dir = temp_dir("metric");
    let path = write_sample_csv(&dir, &values);
    let selection = ["norm", "cauchy", "uniform", "logistic"];

    let by_sse = run_fit(&run_config(path.clone(), CandidateMode::Custom, &selection, Metric::SumsquareError))
        .unwrap()
        .selection;
    let by_aic = run_fit(&run_config(path, CandidateMode::Custom, &selection, Metric::Aic))
        .unwrap()
        .selection;
    std::fs::remove_dir_all(&dir).ok();

    let mut a: Vec<_> = by_sse.ranking.rows().iter().map(|r| r.distribution.clone()).collect();
    let mut b: Vec<_> = by_aic.ranking.rows().iter().map(|r| r.distribution.clone()).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert!(
        by_aic
            .ranking
            .rows()
            .windows(2)
            .all(|w| w[0].quality.aic <= w[1].quality.aic)
    );

    let norm = by_aic.ranking.rows().iter().find(|r| r.distribution == "norm").unwrap();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!((norm.param("loc").unwrap() - mean).abs() < 1e-6);
    assert!((norm.param("scale").unwrap() - 2.0).abs() < 0.25);
}

#[test]
fn unknown_distribution_is_rejected_before_fitting() {
    let dir = temp_dir("unknown");
    let path = write_sample_csv(&dir, &[1.0, 2.0, 3.0]);
    let err = run_fit(&run_config(path, CandidateMode::Custom, &["norm", "not_a_dist"], Metric::Aic))
        .unwrap_err();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("not_a_dist"));
}

#[test]
fn best_json_written_from_run() {
    let mut rng = StdRng::seed_from_u64(3);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let values: Vec<f64> = (0..300).map(|_| normal.sample(&mut rng)).collect();

    let dir = temp_dir("json");
    let path = write_sample_csv(&dir, &values);
    let run = run_fit(&run_config(path, CandidateMode::Custom, &["norm", "expon"], Metric::Bic)).unwrap();

    let json = dir.join("best.json");
    distfit::io::best::write_best_json(&json, &run.selection, &run.load.column).unwrap();
    let best = read_best_json(&json).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(best.distribution, "norm");
    assert_eq!(best.metric, Metric::Bic);
    assert_eq!(best.column, "value");
    assert_eq!(best.fitted + best.skipped, 2);
}
