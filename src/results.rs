//! Sensitivity indices produced by the analyzers.
//!
//! Index arrays serialize as plain JSON lists. JSON has no NaN, so undefined
//! entries (the lower half of the S2 matrices, `sigma` of a single
//! trajectory) are written as `null` and read back as NaN.

use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::method::SensitivityMethod;

/// Elementary-effects statistics of a Morris analysis, one entry per parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorrisResults {
    /// Parameter names, in problem order
    pub names: Vec<String>,

    /// Mean of the elementary effects
    #[serde(with = "nan_as_null::vector")]
    pub mu: Array1<f64>,

    /// Mean of the absolute elementary effects
    #[serde(with = "nan_as_null::vector")]
    pub mu_star: Array1<f64>,

    /// Standard deviation of the elementary effects
    #[serde(with = "nan_as_null::vector")]
    pub sigma: Array1<f64>,

    /// Bootstrap confidence half-width of `mu_star`
    #[serde(with = "nan_as_null::vector")]
    pub mu_star_conf: Array1<f64>,
}

/// Sobol indices of a variance-based analysis, one entry per parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SobolResults {
    /// Parameter names, in problem order
    pub names: Vec<String>,

    /// First-order indices
    #[serde(with = "nan_as_null::vector")]
    pub s1: Array1<f64>,

    /// Bootstrap confidence half-width of the first-order indices
    #[serde(with = "nan_as_null::vector")]
    pub s1_conf: Array1<f64>,

    /// Total-order indices
    #[serde(with = "nan_as_null::vector")]
    pub st: Array1<f64>,

    /// Bootstrap confidence half-width of the total-order indices
    #[serde(with = "nan_as_null::vector")]
    pub st_conf: Array1<f64>,

    /// Second-order indices; entry `[j, k]` is filled for `j < k`, the rest is NaN
    #[serde(with = "nan_as_null::matrix")]
    pub s2: Option<Array2<f64>>,

    /// Bootstrap confidence half-width of the second-order indices
    #[serde(with = "nan_as_null::matrix")]
    pub s2_conf: Option<Array2<f64>>,
}

/// Result of one sensitivity analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum SensitivityResults {
    /// Screening (elementary effects)
    Morris(MorrisResults),

    /// Variance decomposition
    Sobol(SobolResults),
}

impl SensitivityResults {
    /// The method that produced these results.
    pub fn method(&self) -> SensitivityMethod {
        match self {
            SensitivityResults::Morris(_) => SensitivityMethod::Morris,
            SensitivityResults::Sobol(_) => SensitivityMethod::Sobol,
        }
    }

    /// Parameter names, in problem order.
    pub fn names(&self) -> &[String] {
        match self {
            SensitivityResults::Morris(r) => &r.names,
            SensitivityResults::Sobol(r) => &r.names,
        }
    }

    /// The metric parameters are ranked by: `mu_star` for Morris, `S1` for Sobol.
    pub fn primary_metric(&self) -> &Array1<f64> {
        match self {
            SensitivityResults::Morris(r) => &r.mu_star,
            SensitivityResults::Sobol(r) => &r.s1,
        }
    }

    /// The Morris statistics, if this is a Morris result.
    pub fn as_morris(&self) -> Option<&MorrisResults> {
        match self {
            SensitivityResults::Morris(r) => Some(r),
            _ => None,
        }
    }

    /// The Sobol indices, if this is a Sobol result.
    pub fn as_sobol(&self) -> Option<&SobolResults> {
        match self {
            SensitivityResults::Sobol(r) => Some(r),
            _ => None,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse results written by [`SensitivityResults::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

mod nan_as_null {
    use ndarray::{Array1, Array2};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn encode(value: f64) -> Option<f64> {
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    fn decode(cell: Option<f64>) -> f64 {
        cell.unwrap_or(f64::NAN)
    }

    pub mod vector {
        use super::*;

        pub fn serialize<S: Serializer>(values: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|&v| encode(v)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array1<f64>, D::Error> {
            let cells = Vec::<Option<f64>>::deserialize(deserializer)?;
            Ok(cells.into_iter().map(decode).collect())
        }
    }

    pub mod matrix {
        use super::*;

        pub fn serialize<S: Serializer>(
            values: &Option<Array2<f64>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let rows: Option<Vec<Vec<Option<f64>>>> = values.as_ref().map(|m| {
                m.rows()
                    .into_iter()
                    .map(|row| row.iter().map(|&v| encode(v)).collect())
                    .collect()
            });
            rows.serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Array2<f64>>, D::Error> {
            let Some(rows) = Option::<Vec<Vec<Option<f64>>>>::deserialize(deserializer)? else {
                return Ok(None);
            };

            let nrows = rows.len();
            let ncols = rows.first().map_or(0, Vec::len);
            if rows.iter().any(|row| row.len() != ncols) {
                return Err(D::Error::custom("matrix rows differ in length"));
            }

            let data = rows.into_iter().flatten().map(decode).collect();
            Array2::from_shape_vec((nrows, ncols), data)
                .map(Some)
                .map_err(D::Error::custom)
        }
    }
}

impl fmt::Display for MorrisResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Morris Sensitivity Result:")?;
        writeln!(
            f,
            "  {:<12} {:>14} {:>14} {:>14} {:>14}",
            "Parameter", "mu", "mu_star", "sigma", "mu_star_conf"
        )?;
        for (i, name) in self.names.iter().enumerate() {
            writeln!(
                f,
                "  {:<12} {:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e}",
                name, self.mu[i], self.mu_star[i], self.sigma[i], self.mu_star_conf[i]
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SobolResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sobol Sensitivity Result:")?;
        writeln!(
            f,
            "  {:<12} {:>10} {:>10} {:>10} {:>10}",
            "Parameter", "S1", "S1_conf", "ST", "ST_conf"
        )?;
        for (i, name) in self.names.iter().enumerate() {
            writeln!(
                f,
                "  {:<12} {:>10.6} {:>10.6} {:>10.6} {:>10.6}",
                name, self.s1[i], self.s1_conf[i], self.st[i], self.st_conf[i]
            )?;
        }

        if let (Some(s2), Some(s2_conf)) = (&self.s2, &self.s2_conf) {
            writeln!(f, "\n  {:<25} {:>10} {:>10}", "Parameter pair", "S2", "S2_conf")?;
            for j in 0..self.names.len() {
                for k in (j + 1)..self.names.len() {
                    let pair = format!("({}, {})", self.names[j], self.names[k]);
                    writeln!(
                        f,
                        "  {:<25} {:>10.6} {:>10.6}",
                        pair,
                        s2[[j, k]],
                        s2_conf[[j, k]]
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for SensitivityResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityResults::Morris(r) => fmt::Display::fmt(r, f),
            SensitivityResults::Sobol(r) => fmt::Display::fmt(r, f),
        }
    }
}
