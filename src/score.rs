//! Angular comparison of a live signature against a reference signature.

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::DirectionVector;

/// Running count of compared and accepted direction vectors across all
/// strokes of one character attempt.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tally {
    pub total: usize,
    pub valid: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of accepted comparisons, or `0.0` if nothing was compared.
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Return the accuracy of the finished attempt and reset both counters.
    pub fn finish(&mut self) -> f64 {
        let accuracy = self.accuracy();
        self.reset();
        accuracy
    }

    fn add(&mut self, score: StrokeScore) {
        self.total += score.total;
        self.valid += score.valid;
    }
}

/// Result of comparing one stroke.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct StrokeScore {
    /// Number of reference vectors; every one of them counts, compared or not.
    pub total: usize,
    pub valid: usize,
}

/// Compares signatures within an angular tolerance.
#[derive(Debug, Copy, Clone)]
pub struct Scorer {
    tolerance_degrees: f64,
    wrap_angles: bool,
}

impl Scorer {
    pub fn new(tolerance_degrees: f64, wrap_angles: bool) -> Self {
        Self {
            tolerance_degrees,
            wrap_angles,
        }
    }

    /// Whether `live` points in the same direction as `reference`.
    ///
    /// Without wrapping the window is `(ref - tol, ref + tol)` on the raw
    /// `-180..=180` scale, so it does not reach across the ±180° seam.
    pub fn matches(&self, reference: DirectionVector, live: DirectionVector) -> bool {
        let ref_angle = reference.angle_degrees();
        let live_angle = live.angle_degrees();
        if self.wrap_angles {
            let diff = (live_angle - ref_angle + 180.0).rem_euclid(360.0) - 180.0;
            diff.abs() < self.tolerance_degrees
        } else {
            live_angle > ref_angle - self.tolerance_degrees
                && live_angle < ref_angle + self.tolerance_degrees
        }
    }

    /// Compare `live` against `reference` position by position. Comparison
    /// stops at the end of the shorter signature, but all reference vectors
    /// count towards the total. The result is added to `tally`.
    pub fn score(
        &self,
        reference: &[DirectionVector],
        live: &[DirectionVector],
        tally: &mut Tally,
    ) -> StrokeScore {
        trace!(
            "score: {} reference vectors, {} live vectors",
            reference.len(),
            live.len()
        );
        let valid = reference
            .iter()
            .zip(live)
            .filter(|(r, l)| self.matches(**r, **l))
            .count();
        let score = StrokeScore {
            total: reference.len(),
            valid,
        };
        tally.add(score);
        debug!(
            "score: {}/{} valid, running tally {}/{}",
            score.valid, score.total, tally.valid, tally.total
        );
        score
    }
}
