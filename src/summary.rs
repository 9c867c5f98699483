//! Ranked summary of a sensitivity analysis, ready for plotting.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::method::SensitivityMethod;
use crate::results::SensitivityResults;

/// Label of the parameter axis of every summary.
pub const PARAMETER_AXIS_LABEL: &str = "model parameter";

/// Parameters ordered by their primary sensitivity metric, smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSummary {
    /// The method that produced the ranking
    pub method: SensitivityMethod,

    /// Metric symbol, `μ*` or `S1`
    pub x_label: String,

    /// Parameter axis label
    pub y_label: String,

    /// Chart title
    pub title: String,

    /// Parameter names in ranked order
    pub labels: Vec<String>,

    /// Metric values aligned with `labels`, non-decreasing
    pub values: Vec<f64>,
}

impl RankedSummary {
    /// Rank the parameters of `results` by their primary metric.
    ///
    /// The sort is stable, so parameters with equal metrics keep their
    /// problem order.
    pub fn from_results(results: &SensitivityResults) -> Self {
        let method = results.method();
        let metric = results.primary_metric();

        let mut order: Vec<usize> = (0..metric.len()).collect();
        order.sort_by(|&a, &b| metric[a].total_cmp(&metric[b]));

        Self {
            method,
            x_label: method.metric_label().to_string(),
            y_label: PARAMETER_AXIS_LABEL.to_string(),
            title: format!("Sensitivity model: {}", method),
            labels: order.iter().map(|&i| results.names()[i].clone()).collect(),
            values: order.iter().map(|&i| metric[i]).collect(),
        }
    }

    /// Number of ranked parameters.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The most influential parameter and its metric.
    pub fn most_influential(&self) -> Option<(&str, f64)> {
        self.labels
            .last()
            .zip(self.values.last())
            .map(|(label, &value)| (label.as_str(), value))
    }

    /// Iterate over `(label, value)` pairs in ranked order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
