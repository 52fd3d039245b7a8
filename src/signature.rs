//! Reduction of a polyline to its direction signature.
//!
//! Reference strokes come from documents with a downward y axis, while live
//! input arrives with an upward y axis. Reference vectors therefore have
//! their y component negated and live vectors are taken as they are, so
//! both signatures end up in the same y-up convention.

use log::{trace, warn};

use crate::geometry::{DirectionVector, Point, Signature};

/// Direction from the first to the last point of the group of `size` points
/// starting at `start`. The group end is clamped to the last point.
fn group_direction(points: &[Point], start: usize, size: usize) -> DirectionVector {
    let end = (start + size - 1).min(points.len() - 1);
    points[end] - points[start]
}

/// Summarize a reference polyline into one direction vector per group of
/// `group_size` consecutive points, `ceil(len / group_size)` vectors in all.
pub fn summarize_reference(points: &[Point], group_size: usize) -> Signature {
    trace!(
        "summarize_reference: {} points, group size {}",
        points.len(),
        group_size
    );
    if points.is_empty() || group_size == 0 {
        return Signature::new();
    }
    if points.len() < group_size {
        warn!(
            "Insufficient points: stroke has {} points, fewer than the group size {}",
            points.len(),
            group_size
        );
    }

    (0..points.len())
        .step_by(group_size)
        .map(|start| {
            let v = group_direction(points, start, group_size);
            DirectionVector::new(v.x, -v.y)
        })
        .collect()
}

/// Summarize live input into exactly `reference_len` direction vectors so it
/// lines up with the reference signature. Trailing points that do not fill a
/// whole group are ignored.
///
/// Returns an empty signature if fewer points than `reference_len` were
/// drawn.
pub fn summarize_live(points: &[Point], reference_len: usize) -> Signature {
    trace!(
        "summarize_live: {} points, {} reference vectors",
        points.len(),
        reference_len
    );
    if reference_len == 0 {
        return Signature::new();
    }
    if points.len() < reference_len {
        warn!(
            "Drawn point deficit: {} points drawn, {} reference directions",
            points.len(),
            reference_len
        );
        return Signature::new();
    }

    let group_size = points.len() / reference_len;
    (0..reference_len)
        .map(|i| group_direction(points, i * group_size, group_size))
        .collect()
}
