//! Flattening of cubic Bézier segments by forward differencing.
//!
//! The curve is stepped at `subdivisions + 1` even parameter intervals. The
//! first, second and third order differences of the cubic polynomial are
//! derived once from the control points, so every step only needs three
//! additions per axis.

use log::trace;
use lyon_geom::CubicBezierSegment;

use crate::geometry::{Point, Polyline};

/// Forward differences for one axis of a cubic polynomial.
#[derive(Debug, Copy, Clone)]
struct Differences {
    value: f64,
    d1: f64,
    d2: f64,
    d3: f64,
}

impl Differences {
    fn new(p1: f64, p2: f64, p3: f64, p4: f64, step: f64) -> Self {
        let step2 = step * step;
        let step3 = step2 * step;

        let pre1 = 3.0 * step;
        let pre2 = 3.0 * step2;
        let pre4 = 6.0 * step2;
        let pre5 = 6.0 * step3;

        let tmp1 = p1 - p2 * 2.0 + p3;
        let tmp2 = (p2 - p3) * 3.0 - p1 + p4;

        Self {
            value: p1,
            d1: (p2 - p1) * pre1 + tmp1 * pre2 + tmp2 * step3,
            d2: tmp1 * pre4 + tmp2 * pre5,
            d3: tmp2 * pre5,
        }
    }

    fn advance(&mut self) -> f64 {
        self.value += self.d1;
        self.d1 += self.d2;
        self.d2 += self.d3;
        self.value
    }
}

/// Flatten one cubic segment into `subdivisions + 1` points.
///
/// The start point is never part of the output since the caller already
/// holds it. The last point is always exactly `segment.to`.
pub fn tessellate_cubic(segment: &CubicBezierSegment<f64>, subdivisions: usize) -> Polyline {
    trace!("tessellate_cubic: {} subdivisions", subdivisions);
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / (subdivisions + 1) as f64;

    let mut x = Differences::new(
        segment.from.x,
        segment.ctrl1.x,
        segment.ctrl2.x,
        segment.to.x,
        step,
    );
    let mut y = Differences::new(
        segment.from.y,
        segment.ctrl1.y,
        segment.ctrl2.y,
        segment.to.y,
        step,
    );

    let mut points = Polyline::with_capacity(subdivisions + 1);
    for _ in 0..subdivisions {
        points.push(Point::new(x.advance(), y.advance()));
    }
    points.push(segment.to.into());
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    use lyon_geom::point;

    fn segment() -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: point(10.0, 80.0),
            ctrl1: point(40.0, 10.0),
            ctrl2: point(65.0, 10.0),
            to: point(95.0, 80.0),
        }
    }

    #[test]
    fn test_ends_with_exact_end_point() {
        for n in 0..20 {
            let points = tessellate_cubic(&segment(), n);
            assert_eq!(points.len(), n + 1);
            assert_eq!(points[n], Point::new(95.0, 80.0));
        }
    }

    #[test]
    fn test_zero_subdivisions() {
        let points = tessellate_cubic(&segment(), 0);
        assert_eq!(points, vec![Point::new(95.0, 80.0)]);
    }

    #[test]
    fn test_straight_line_midpoint() {
        let line = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(10.0, 0.0),
            ctrl2: point(20.0, 0.0),
            to: point(30.0, 0.0),
        };
        let points = tessellate_cubic(&line, 1);
        assert_eq!(points.len(), 2);
        assert!((points[0].x - 15.0).abs() < 1e-9);
        assert!(points[0].y.abs() < 1e-9);
        assert_eq!(points[1], Point::new(30.0, 0.0));
    }

    /// The stepped points must lie on the curve at even parameter spacing.
    #[test]
    fn test_matches_curve_samples() {
        let curve = segment();
        let n = 7;
        let points = tessellate_cubic(&curve, n);
        for (i, p) in points.iter().enumerate().take(n) {
            #[allow(clippy::cast_precision_loss)]
            let t = (i + 1) as f64 / (n + 1) as f64;
            let expected = curve.sample(t);
            assert!((p.x - expected.x).abs() < 1e-9, "x at step {}", i);
            assert!((p.y - expected.y).abs() < 1e-9, "y at step {}", i);
        }
    }
}
