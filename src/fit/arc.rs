use super::DEGENERATE_ERROR;
use crate::stroke::{path_lengths, StrokePoint};
use serde::{Deserialize, Serialize};

/// Residual accumulated by the arc fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Residual {
    /// Σ |r − d|
    #[default]
    Absolute,
    /// Σ (r − d)²
    Squared,
}

/// Arc error of a range: the circle through its endpoints and the point where
/// the chord's perpendicular bisector crosses the range, scored by the radial
/// residual of every sample.
pub fn arc_error(points: &[StrokePoint], residual: Residual) -> f64 {
    if points.len() < 3 {
        return DEGENERATE_ERROR;
    }
    let a = points[0];
    let b = points[points.len() - 1];
    let chord = a.distance(&b);
    if chord <= f64::EPSILON {
        return DEGENERATE_ERROR;
    }
    let c = bisector_point(points);
    let Some((cx, cy, r)) = circumcircle(&a, &b, &c) else {
        return DEGENERATE_ERROR;
    };
    points
        .iter()
        .map(|p| {
            let d = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
            match residual {
                Residual::Absolute => (r - d).abs(),
                Residual::Squared => (r - d).powi(2),
            }
        })
        .sum()
}

/// Crossing of the chord's perpendicular bisector with the polyline, taking
/// the crossing nearest the middle sample. Falls back to the sample at half
/// the path length when the bisector never meets the polyline.
fn bisector_point(points: &[StrokePoint]) -> StrokePoint {
    let a = points[0];
    let b = points[points.len() - 1];
    let (mx, my) = (0.5 * (a.x + b.x), 0.5 * (a.y + b.y));
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let side = |p: &StrokePoint| (p.x - mx) * dx + (p.y - my) * dy;
    let middle = (points.len() / 2) as f64;

    let mut best: Option<(f64, StrokePoint)> = None;
    for (i, w) in points.windows(2).enumerate() {
        let (f0, f1) = (side(&w[0]), side(&w[1]));
        if f0 * f1 > 0.0 {
            continue;
        }
        let s = if f0 == f1 { 0.0 } else { f0 / (f0 - f1) };
        let pos = i as f64 + s;
        let gap = (pos - middle).abs();
        if best.map_or(true, |(g, _)| gap < g) {
            best = Some((gap, w[0].lerp(&w[1], s)));
        }
    }
    if let Some((_, p)) = best {
        return p;
    }
    let lengths = path_lengths(points);
    let half = 0.5 * lengths[lengths.len() - 1];
    let k = lengths.partition_point(|&l| l < half).min(points.len() - 1);
    points[k]
}

/// Centre and radius of the circle through three points.
fn circumcircle(a: &StrokePoint, b: &StrokePoint, c: &StrokePoint) -> Option<(f64, f64, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    let scale = a.distance(b).powi(2).max(1e-12);
    if d.abs() <= 1e-12 * scale {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let r = ((a.x - ux).powi(2) + (a.y - uy).powi(2)).sqrt();
    if ux.is_finite() && uy.is_finite() && r.is_finite() {
        Some((ux, uy, r))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_circle(n: usize, r: f64) -> Vec<StrokePoint> {
        (0..n)
            .map(|i| {
                let a = std::f64::consts::FRAC_PI_2 * i as f64 / (n - 1) as f64;
                StrokePoint::new(5.0 + r * a.cos(), -2.0 + r * a.sin(), i as f64)
            })
            .collect()
    }

    #[test]
    fn circle_samples_fit_exactly() {
        let pts = quarter_circle(21, 12.0);
        assert!(arc_error(&pts, Residual::Absolute) < 1e-9);
        assert!(arc_error(&pts, Residual::Squared) < 1e-12);
    }

    #[test]
    fn collinear_and_closed_ranges_are_degenerate() {
        let line: Vec<StrokePoint> = (0..5)
            .map(|i| StrokePoint::new(i as f64, i as f64, i as f64))
            .collect();
        assert_eq!(arc_error(&line, Residual::Absolute), DEGENERATE_ERROR);
        let closed = [
            StrokePoint::new(0.0, 0.0, 0.0),
            StrokePoint::new(1.0, 1.0, 1.0),
            StrokePoint::new(0.0, 0.0, 2.0),
        ];
        assert_eq!(arc_error(&closed, Residual::Absolute), DEGENERATE_ERROR);
    }

    #[test]
    fn circumcircle_of_right_triangle() {
        let (cx, cy, r) = circumcircle(
            &StrokePoint::new(0.0, 0.0, 0.0),
            &StrokePoint::new(2.0, 0.0, 1.0),
            &StrokePoint::new(0.0, 2.0, 2.0),
        )
        .unwrap();
        assert!((cx - 1.0).abs() < 1e-12 && (cy - 1.0).abs() < 1e-12);
        assert!((r - 2f64.sqrt()).abs() < 1e-12);
    }
}
