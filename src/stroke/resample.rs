//! Arc-length-uniform resampling.
//!
//! Detectors that reason about "equal steps along the pen path" (straw,
//! monotonicity) run on a resampled copy. Every resampled sample records its
//! arc position so detector output can be mapped back onto the stroke it was
//! derived from.

use super::series::{bounding_diagonal, path_lengths};
use super::StrokePoint;

/// Resampled copy of a point series.
#[derive(Clone, Debug)]
pub struct Resampled {
    pub points: Vec<StrokePoint>,
    /// Arc-length position of every resampled sample along the source.
    pub arc: Vec<f64>,
    source_lengths: Vec<f64>,
}

impl Resampled {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Source sample closest to resampled sample `i` by arc length. Ties go to
    /// the lower index.
    pub fn source_index(&self, i: usize) -> usize {
        let s = self.arc[i];
        let lengths = &self.source_lengths;
        let hi = lengths.partition_point(|&l| l < s);
        if hi == 0 {
            return 0;
        }
        if hi >= lengths.len() {
            return lengths.len() - 1;
        }
        let lo = hi - 1;
        if s - lengths[lo] <= lengths[hi] - s {
            lo
        } else {
            hi
        }
    }

    /// Map resampled indices onto the source; sorted and unique.
    pub fn map_indices(&self, indices: &[usize]) -> Vec<usize> {
        let mut out: Vec<usize> = indices.iter().map(|&i| self.source_index(i)).collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Spacing that puts roughly `points_per_diagonal` samples across the
/// bounding-box diagonal, never below `min_spacing`.
pub fn resample_spacing(points: &[StrokePoint], points_per_diagonal: f64, min_spacing: f64) -> f64 {
    (bounding_diagonal(points) / points_per_diagonal.max(1.0)).max(min_spacing)
}

/// Interpolate samples `spacing` apart along the polyline. The first and last
/// output samples are the first and last input samples.
pub fn resample(points: &[StrokePoint], spacing: f64) -> Resampled {
    let source_lengths = path_lengths(points);
    let Some(&first) = points.first() else {
        return Resampled {
            points: Vec::new(),
            arc: Vec::new(),
            source_lengths,
        };
    };
    if spacing <= 0.0 || !spacing.is_finite() {
        return Resampled {
            points: points.to_vec(),
            arc: source_lengths.clone(),
            source_lengths,
        };
    }
    let total = source_lengths.last().copied().unwrap_or(0.0);
    let mut out = vec![first];
    let mut arc = vec![0.0];

    let mut acc = 0.0;
    let mut walked = 0.0;
    for w in points.windows(2) {
        let mut start = w[0];
        let b = w[1];
        let mut d = start.distance(&b);
        while d > 0.0 && acc + d >= spacing {
            let s = (spacing - acc) / d;
            let q = start.lerp(&b, s);
            walked += spacing - acc;
            out.push(q);
            arc.push(walked);
            start = q;
            d = start.distance(&b);
            acc = 0.0;
        }
        acc += d;
        walked += d;
    }

    let last = points[points.len() - 1];
    let tail = total - arc[arc.len() - 1];
    if out.len() > 1 && tail < 0.5 * spacing {
        let k = out.len() - 1;
        out[k] = last;
        arc[k] = total;
    } else if tail > 0.0 || out.len() == 1 {
        out.push(last);
        arc.push(total);
    }

    Resampled {
        points: out,
        arc,
        source_lengths,
    }
}
