use super::{dominant_axis, DEGENERATE_ERROR};
use crate::stroke::StrokePoint;
use nalgebra::{DMatrix, DVector};

/// Least-squares polynomial error over the dominant axis: sum of absolute
/// residuals. The abscissa is normalised to [-1, 1] before building the
/// normal equations.
pub fn poly_error(points: &[StrokePoint], degree: usize) -> f64 {
    let samples = dominant_axis(points);
    let mut abscissae: Vec<f64> = samples.iter().map(|s| s.0).collect();
    abscissae.sort_by(|a, b| a.total_cmp(b));
    abscissae.dedup();
    if abscissae.len() < degree + 1 {
        return DEGENERATE_ERROR;
    }
    let (lo, hi) = (abscissae[0], abscissae[abscissae.len() - 1]);
    let half = 0.5 * (hi - lo);
    let mid = 0.5 * (hi + lo);
    let norm = |x: f64| if half > 0.0 { (x - mid) / half } else { 0.0 };

    let cols = degree + 1;
    let design = DMatrix::from_fn(samples.len(), cols, |r, c| norm(samples[r].0).powi(c as i32));
    let rhs = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.1));
    let normal = design.transpose() * &design;
    let Some(coeffs) = normal.lu().solve(&(design.transpose() * rhs)) else {
        return DEGENERATE_ERROR;
    };
    if coeffs.iter().any(|c| !c.is_finite()) {
        return DEGENERATE_ERROR;
    }
    samples
        .iter()
        .map(|&(x, y)| {
            let u = norm(x);
            let fitted: f64 = coeffs
                .iter()
                .enumerate()
                .map(|(k, c)| c * u.powi(k as i32))
                .sum();
            (y - fitted).abs()
        })
        .sum()
}
