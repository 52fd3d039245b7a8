use log::trace;

use crate::error::Error;
use crate::geometry::{Point, Polyline};

/// Upper bound for the number of points a single segment may be split into.
pub const MAX_SEGMENT_POINTS: usize = 65_536;

/// Number of evenly spaced points needed between `from` and `to` so that no
/// gap exceeds `spacing`, or `None` if the pair is already close enough.
fn subdivisions(from: Point, to: Point, spacing: f64) -> Result<Option<usize>, Error> {
    let distance = from.distance(to);
    if distance < spacing {
        return Ok(None);
    }
    let steps = (distance / spacing).floor();
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_SEGMENT_POINTS as f64;
    if !steps.is_finite() || steps > limit {
        return Err(Error::SegmentTooLong {
            distance,
            spacing,
            limit: MAX_SEGMENT_POINTS,
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let k = steps as usize;
    Ok(Some(k.max(1)))
}

/// Push the points leading from `from` towards `to`, starting at `from` and
/// excluding `to`. Nothing is pushed if the segment is too long.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn fill_segment(
    from: Point,
    to: Point,
    spacing: f64,
    out: &mut Polyline,
) -> Result<(), Error> {
    match subdivisions(from, to, spacing)? {
        None => out.push(from),
        Some(k) => {
            let t = 1.0 / k as f64;
            out.extend((0..k).map(|j| from.lerp(to, t * j as f64)));
        }
    }
    Ok(())
}

/// Re-emit a polyline so that consecutive points are never farther apart
/// than `spacing`. Endpoints are preserved and the point count never shrinks.
///
/// Fails if a segment would need more than [`MAX_SEGMENT_POINTS`] points or
/// has a non-finite length.
pub fn resample(points: &[Point], spacing: f64) -> Result<Polyline, Error> {
    trace!("resample: {} points, spacing {}", points.len(), spacing);
    let last = match points.last() {
        Some(last) => *last,
        None => return Ok(Polyline::new()),
    };

    let mut out = Polyline::with_capacity(points.len());
    for pair in points.windows(2) {
        fill_segment(pair[0], pair[1], spacing, &mut out)?;
    }
    out.push(last);
    Ok(out)
}
