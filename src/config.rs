#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the operands of a relative cubic curve (`c`) are resolved.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelativeMode {
    /// All three operand pairs are offsets from the segment start point.
    CurrentPoint,
    /// Each operand pair is an offset from the previous control point.
    Chained,
}

/// Tunables shared by the whole pipeline.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum distance between consecutive reference points after
    /// resampling.
    pub spacing: f64,
    /// Number of reference points summarized into one direction vector.
    pub group_size: usize,
    /// Interior points emitted per cubic Bezier segment.
    pub subdivisions: usize,
    /// Half width of the accepted angular window, in degrees.
    pub tolerance_degrees: f64,
    /// Compare angles modulo 360 degrees instead of on the raw
    /// `-180..=180` scale.
    pub wrap_angles: bool,
    pub relative_mode: RelativeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            group_size: 5,
            subdivisions: 2,
            tolerance_degrees: 25.0,
            wrap_angles: false,
            relative_mode: RelativeMode::CurrentPoint,
        }
    }
}

impl Config {
    /// Derive the resampling spacing from the radius of a drawn point: two
    /// points are placed at most one diameter apart.
    pub fn from_point_radius(radius: f64) -> Self {
        Self {
            spacing: radius * 2.0,
            ..Self::default()
        }
    }

    /// Spacing used when interpolating live input points.
    pub fn live_spacing(&self) -> f64 {
        self.spacing / 2.0
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(Error::Config(format!(
                "spacing must be a positive number, got {}",
                self.spacing
            )));
        }
        if self.group_size == 0 {
            return Err(Error::Config("group size must be at least 1".into()));
        }
        if !self.tolerance_degrees.is_finite() || self.tolerance_degrees <= 0.0 {
            return Err(Error::Config(format!(
                "tolerance must be a positive number of degrees, got {}",
                self.tolerance_degrees
            )));
        }
        Ok(())
    }
}
