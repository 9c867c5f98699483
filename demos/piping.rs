//! Sensitivity of the Sellmeijer piping rule
//!
//! This demo screens the eight inputs of the critical-head formula with the
//! Morris method, computes Sobol indices for the same model, and writes one
//! bar chart per method.
//!
//! Run with `cargo run --example piping -- [output_folder]`. Set `RUST_LOG=debug`
//! to see the sampling and analysis stages.

use gsa_rs::{Problem, Result, Sensitivity, SensitivityConfig, SensitivityMethod};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Critical head `Hc = L · Fg · Fs · Fr` of the Sellmeijer rule
///
/// `v = [L, D, kappa, d70, rho_s, rho_l, eta, theta]`
fn critical_head(v: &[f64]) -> f64 {
    let (l, d, kappa, d70) = (v[0], v[1], v[2], v[3]);
    let (rho_s, rho_l, eta, theta) = (v[4], v[5], v[6], v[7]);

    // Geometry factor
    let ratio = d / l;
    let exponent = if ratio == 1.0 {
        1.08
    } else {
        0.24 / (ratio.powf(2.8) - 1.0)
    };
    let fg = 0.91 * ratio.powf(exponent);

    // Scale factor
    let fs = d70 / (kappa * 1e-10 * l).powf(1.0 / 3.0);

    // Resistance factor
    let fr = (rho_s - rho_l) * eta * theta.to_radians().tan() / rho_l;

    l * fg * fs * fr
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gsa_rs=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let output_folder = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./sensitivity".to_string());

    let problem = Problem::from_json(
        r#"{
            "names": ["L", "D", "kappa", "d70", "rho_s", "rho_l", "eta", "theta"],
            "bounds": [
                [5, 20],
                [10, 100],
                [1e-10, 1e-2],
                [2e-7, 2e-4],
                [2000, 3000],
                [900, 1100],
                [2.5e-2, 2.5],
                [30, 50]
            ]
        }"#,
    )?;

    let mut sensitivity = Sensitivity::new(SensitivityConfig::default());
    sensitivity.define_model(critical_head, problem, &[])?;

    for method in SensitivityMethod::ALL {
        let results = sensitivity.run_sensitivity(method)?;
        println!("{}", results);

        if let Some(summary) = sensitivity.summary() {
            println!("Ranking ({}):", summary.x_label);
            for (label, value) in summary.iter().rev() {
                println!("  {:<8} {:>14.6}", label, value);
            }
        }

        let path = sensitivity.plot(&output_folder, &format!("{}.svg", method))?;
        println!("Plot written to {}\n", path.display());
    }

    Ok(())
}
