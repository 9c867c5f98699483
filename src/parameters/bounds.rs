//! Parameter bounds implementation
//!
//! This module provides the closed interval that each uncertain input is
//! sampled from. Samplers work in the unit hypercube; [`Bounds::scale`] maps a
//! unit coordinate onto the physical range of the parameter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with parameter bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds: min ({min}) must be less than max ({max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Bounds must be finite, got [{min}, {max}]")]
    InfiniteBounds { min: f64, max: f64 },
}

/// A finite sampling interval `[min, max]` with `min < max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower end of the sampling range
    pub min: f64,

    /// Upper end of the sampling range
    pub max: f64,
}

// Bounds are written as a `[low, high]` pair, matching the problem record
// format used in JSON problem files.
impl Serialize for Bounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.min, self.max].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (min, max) = <(f64, f64)>::deserialize(deserializer)?;
        Bounds::new(min, max).map_err(serde::de::Error::custom)
    }
}

impl Bounds {
    /// Create a new sampling interval
    ///
    /// # Arguments
    ///
    /// * `min` - Lower end of the range
    /// * `max` - Upper end of the range
    ///
    /// # Returns
    ///
    /// A new `Bounds` object if both ends are finite and min < max, or an error otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use gsa_rs::parameters::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(5.0, 20.0).unwrap();
    /// assert_eq!(bounds.width(), 15.0);
    /// assert!(Bounds::new(1.0, 1.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, BoundsError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BoundsError::InfiniteBounds { min, max });
        }

        if min >= max {
            return Err(BoundsError::InvalidBounds { min, max });
        }

        Ok(Self { min, max })
    }

    /// Width of the interval (`max - min`)
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Map a unit-interval coordinate onto the bounds
    ///
    /// # Arguments
    ///
    /// * `unit` - Coordinate in `[0, 1]`
    ///
    /// # Returns
    ///
    /// `min + unit * (max - min)`
    pub fn scale(&self, unit: f64) -> f64 {
        self.min + unit * self.width()
    }

    /// Check if a value is within the bounds
    pub fn is_within_bounds(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(bounds: Bounds) -> Self {
        (bounds.min, bounds.max)
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = BoundsError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Bounds::new(min, max)
    }
}

impl TryFrom<[f64; 2]> for Bounds {
    type Error = BoundsError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        Bounds::new(min, max)
    }
}
