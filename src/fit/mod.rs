//! Fit-error evaluators scoring how well a stroke range matches a primitive.
//!
//! Every evaluator returns a non-negative error. Ranges that cannot be fitted
//! (coincident samples, collinear arc triples, singular systems) score
//! [`DEGENERATE_ERROR`] rather than NaN, so they always lose comparisons.

pub mod arc;
pub mod line;
pub mod poly;

pub use arc::{arc_error, Residual};
pub use line::line_error;
pub use poly::poly_error;

use crate::stroke::{LineTest, StrokePoint};
use serde::{Deserialize, Serialize};

/// Error assigned to ranges no primitive can be fitted to.
pub const DEGENERATE_ERROR: f64 = f64::INFINITY;

/// Cost model driving segment merges in the refiner.
pub trait SegmentCost {
    /// Error of the inclusive range `start..=end` of `points`.
    fn segment_error(
        &self,
        points: &[StrokePoint],
        path_lengths: &[f64],
        start: usize,
        end: usize,
    ) -> f64;
}

/// Parameters of the primitive fits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Degree of the polynomial fit.
    pub poly_degree: usize,
    /// Residual used by the arc fit.
    pub residual: Residual,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            poly_degree: 2,
            residual: Residual::Absolute,
        }
    }
}

/// Default cost model: straight ranges are scored with the line fit, curved
/// ones with the better of the polynomial and arc fits.
#[derive(Clone, Debug)]
pub struct FitEvaluator {
    line_test: LineTest,
    poly_degree: usize,
    residual: Residual,
}

impl FitEvaluator {
    pub fn new(params: &FitParams, line_test: LineTest) -> Self {
        Self {
            line_test,
            poly_degree: params.poly_degree,
            residual: params.residual,
        }
    }
}

impl Default for FitEvaluator {
    fn default() -> Self {
        Self::new(&FitParams::default(), LineTest::default())
    }
}

impl SegmentCost for FitEvaluator {
    fn segment_error(
        &self,
        points: &[StrokePoint],
        path_lengths: &[f64],
        start: usize,
        end: usize,
    ) -> f64 {
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        let range = &points[a..=b];
        if self.line_test.passes(points, path_lengths, a, b) {
            return line_error(range);
        }
        poly_error(range, self.poly_degree).min(arc_error(range, self.residual))
    }
}

/// Axis with the larger spread; `true` when y dominates.
pub(crate) fn y_dominant(points: &[StrokePoint]) -> bool {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    max_y - min_y > max_x - min_x
}

/// (abscissa, ordinate) pairs over the dominant axis.
pub(crate) fn dominant_axis(points: &[StrokePoint]) -> Vec<(f64, f64)> {
    if y_dominant(points) {
        points.iter().map(|p| (p.y, p.x)).collect()
    } else {
        points.iter().map(|p| (p.x, p.y)).collect()
    }
}
