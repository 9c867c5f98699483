//! The analysis session: define a model once, run any method on it, plot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ndarray::Array1;
use tracing::{debug, info, warn};

use crate::config::SensitivityConfig;
use crate::error::{GsaError, Result};
use crate::method::SensitivityMethod;
use crate::model::{Model, SensitivityFunction};
use crate::parameters::Problem;
use crate::plot::{SummaryRenderer, SvgBarChart};
use crate::results::SensitivityResults;
use crate::sample::SampleSet;
use crate::summary::RankedSummary;

/// File name used by [`Sensitivity::plot`] callers that have no preference.
pub const DEFAULT_PLOT_NAME: &str = "sensitivity.svg";

/// A global sensitivity analysis of one model.
///
/// The session holds the model definition and the state of the last
/// successful run: its sample, the model outputs, the indices and the ranked
/// summary. Each run replaces that state wholesale; a failed run leaves it
/// untouched.
///
/// # Example
///
/// ```
/// use gsa_rs::{Problem, Sensitivity, SensitivityConfig, SensitivityMethod};
///
/// let problem = Problem::new(
///     vec!["a".to_string(), "b".to_string()],
///     vec![(0.0, 1.0), (0.0, 1.0)],
/// )
/// .unwrap();
///
/// let mut sensitivity = Sensitivity::new(SensitivityConfig::default().with_n_samples(64));
/// sensitivity
///     .define_model(|v: &[f64]| v[1] + v[2] * v[0] * v[0], problem, &[0.0])
///     .unwrap();
///
/// let results = sensitivity.run_sensitivity(SensitivityMethod::Morris).unwrap();
/// assert_eq!(results.names().len(), 2);
///
/// let summary = sensitivity.summary().unwrap();
/// assert_eq!(summary.labels.last().map(String::as_str), Some("a"));
/// ```
#[derive(Debug, Default)]
pub struct Sensitivity {
    config: SensitivityConfig,
    model: Option<Model>,
    samples: Option<SampleSet>,
    outputs: Option<Array1<f64>>,
    results: Option<SensitivityResults>,
    summary: Option<RankedSummary>,
}

impl Sensitivity {
    /// Create a session with the given configuration and no model.
    pub fn new(config: SensitivityConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The configuration used by subsequent runs.
    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// Replace the configuration. Results of earlier runs are kept.
    pub fn set_config(&mut self, config: SensitivityConfig) {
        self.config = config;
    }

    /// Define the model to analyze.
    ///
    /// # Arguments
    ///
    /// * `function` - The model; receives `fixed_arguments` followed by one
    ///   sampled point
    /// * `problem` - Names and bounds of the uncertain parameters
    /// * `fixed_arguments` - Values prepended to every sampled point
    ///
    /// Any previously defined model and all results derived from it are
    /// discarded.
    pub fn define_model<F>(
        &mut self,
        function: F,
        problem: Problem,
        fixed_arguments: &[f64],
    ) -> Result<()>
    where
        F: SensitivityFunction + 'static,
    {
        let model = Model::new(function, problem, fixed_arguments)?;
        debug!(
            num_vars = model.problem().num_vars(),
            fixed_arguments = fixed_arguments.len(),
            "model defined"
        );

        self.model = Some(model);
        self.clear_results();
        Ok(())
    }

    /// The parameter space of the defined model.
    pub fn problem(&self) -> Option<&Problem> {
        self.model.as_ref().map(Model::problem)
    }

    /// The defined model.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Sample, evaluate and analyze the model with `method`.
    ///
    /// # Returns
    ///
    /// * The indices of this run; they are also kept in the session together
    ///   with the sample, the outputs and the ranked summary
    pub fn run_sensitivity(&mut self, method: SensitivityMethod) -> Result<&SensitivityResults> {
        self.config.validate()?;
        let model = self.model.as_ref().ok_or(GsaError::ModelNotDefined)?;
        let problem = model.problem();
        let config = &self.config;

        let start = Instant::now();
        info!(
            %method,
            num_vars = problem.num_vars(),
            n_samples = config.n_samples,
            "starting sensitivity analysis"
        );

        let procedure = method.procedure();
        let x = procedure.sample(problem, config)?;
        debug!(rows = x.nrows(), "sample drawn");

        let y = model.evaluate(&x, config.parallel)?;
        debug!(evaluations = y.len(), "model evaluated");

        let results = procedure.analyze(problem, &x, &y, config)?;
        let summary = RankedSummary::from_results(&results);

        if let Some((name, value)) = summary.most_influential() {
            info!(
                %method,
                evaluations = y.len(),
                most_influential = name,
                value,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "sensitivity analysis finished"
            );
        }

        self.samples = Some(SampleSet::new(method, x));
        self.outputs = Some(y);
        self.summary = Some(summary);
        Ok(self.results.insert(results))
    }

    /// Parse a method token (`"morris"` or `"sobol"`) and run it.
    pub fn run_sensitivity_by_name(&mut self, method: &str) -> Result<&SensitivityResults> {
        let method: SensitivityMethod = method.parse()?;
        self.run_sensitivity(method)
    }

    /// Indices of the last successful run.
    pub fn results(&self) -> Option<&SensitivityResults> {
        self.results.as_ref()
    }

    /// Sample of the last successful run.
    pub fn samples(&self) -> Option<&SampleSet> {
        self.samples.as_ref()
    }

    /// Model outputs of the last successful run, aligned with the sample rows.
    pub fn outputs(&self) -> Option<&Array1<f64>> {
        self.outputs.as_ref()
    }

    /// Ranked summary of the last successful run.
    pub fn summary(&self) -> Option<&RankedSummary> {
        self.summary.as_ref()
    }

    /// Draw the ranked summary as an SVG bar chart.
    ///
    /// `output_folder` is created when missing. A `name` without extension
    /// gets `.svg` appended; any other extension is replaced by `.svg`.
    ///
    /// # Returns
    ///
    /// * The path of the written file
    pub fn plot(&self, output_folder: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
        self.plot_with(&SvgBarChart::default(), output_folder, name)
    }

    /// Draw the ranked summary with a custom renderer.
    ///
    /// The written file always carries the renderer's extension.
    pub fn plot_with<R: SummaryRenderer + ?Sized>(
        &self,
        renderer: &R,
        output_folder: impl AsRef<Path>,
        name: &str,
    ) -> Result<PathBuf> {
        let summary = self.summary.as_ref().ok_or_else(|| {
            GsaError::InvalidState("no results to plot: run an analysis first".to_string())
        })?;
        if name.trim().is_empty() {
            return Err(GsaError::InvalidInput(
                "plot file name must not be empty".to_string(),
            ));
        }

        let folder = output_folder.as_ref();
        if !folder.exists() {
            fs::create_dir_all(folder)?;
            debug!(folder = %folder.display(), "created output folder");
        }

        let mut path = folder.join(name);
        let expected = renderer.extension();
        match path.extension().and_then(|ext| ext.to_str()) {
            None => {
                path.set_extension(expected);
            }
            Some(ext) if ext.eq_ignore_ascii_case(expected) => {}
            Some(ext) => {
                warn!(requested = ext, written = expected, "plot extension replaced");
                path.set_extension(expected);
            }
        }

        renderer.render(summary, &path)?;
        info!(path = %path.display(), "sensitivity plot written");
        Ok(path)
    }

    fn clear_results(&mut self) {
        self.samples = None;
        self.outputs = None;
        self.results = None;
        self.summary = None;
    }
}
