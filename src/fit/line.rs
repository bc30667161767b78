use super::{dominant_axis, DEGENERATE_ERROR};
use crate::stroke::StrokePoint;
use nalgebra::{Matrix2, Vector2};

/// Least-squares line error: sum of perpendicular distances to the fitted
/// line. The fit regresses over the axis with the larger spread so vertical
/// ranges fit exactly.
pub fn line_error(points: &[StrokePoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let samples = dominant_axis(points);
    let n = samples.len() as f64;
    let (mut sx, mut sxx, mut sy, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in &samples {
        sx += x;
        sxx += x * x;
        sy += y;
        sxy += x * y;
    }
    let spread = sxx - sx * sx / n;
    if spread <= f64::EPSILON * sxx.max(1.0) {
        return DEGENERATE_ERROR;
    }
    let normal = Matrix2::new(n, sx, sx, sxx);
    let Some(coeffs) = normal.lu().solve(&Vector2::new(sy, sxy)) else {
        return DEGENERATE_ERROR;
    };
    let (intercept, slope) = (coeffs[0], coeffs[1]);
    if !intercept.is_finite() || !slope.is_finite() {
        return DEGENERATE_ERROR;
    }
    let norm = (slope * slope + 1.0).sqrt();
    samples
        .iter()
        .map(|&(x, y)| (slope * x - y + intercept).abs() / norm)
        .sum()
}
