//! Plot output of a session.

use std::fs;
use std::path::Path;

use gsa_rs::{
    RankedSummary, Result, Sensitivity, SensitivityConfig, SensitivityMethod, SummaryRenderer,
};

use crate::test_helpers::{critical_head, piping_problem};

fn run(method: SensitivityMethod) -> Sensitivity {
    let mut s = Sensitivity::new(SensitivityConfig::default().with_n_samples(32));
    s.define_model(critical_head, piping_problem(), &[]).unwrap();
    s.run_sensitivity(method).unwrap();
    s
}

#[test]
fn test_plot_creates_folder_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("sensitivity");
    assert!(!folder.exists());

    let s = run(SensitivityMethod::Morris);
    let path = s.plot(&folder, "Morris.svg").unwrap();

    assert!(folder.is_dir());
    assert_eq!(path, folder.join("Morris.svg"));

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Sensitivity model: morris"));
    assert!(svg.contains("model parameter"));
    assert!(svg.contains("μ*"));
    assert!(svg.contains("kappa"));
}

#[test]
fn test_plot_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();

    let path = run(SensitivityMethod::Morris).plot(dir.path(), "chart").unwrap();
    let path_again = run(SensitivityMethod::Sobol).plot(dir.path(), "chart").unwrap();
    assert_eq!(path, path_again);

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Sensitivity model: sobol"));
    assert!(svg.contains(">S1<"));
}

struct CsvRenderer;

impl SummaryRenderer for CsvRenderer {
    fn extension(&self) -> &str {
        "csv"
    }

    fn render(&self, summary: &RankedSummary, path: &Path) -> Result<()> {
        let mut out = format!("{},{}\n", summary.y_label, summary.x_label);
        for (label, value) in summary.iter() {
            out.push_str(&format!("{},{}\n", label, value));
        }
        fs::write(path, out)?;
        Ok(())
    }
}

#[test]
fn test_custom_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let s = run(SensitivityMethod::Sobol);

    let path = s.plot_with(&CsvRenderer, dir.path(), "sobol").unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));

    let csv = fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("model parameter,S1"));
    assert_eq!(csv.lines().count(), 9);
}
