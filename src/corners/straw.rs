use super::options::DetectorParams;
use crate::stroke::series::median;
use crate::stroke::{path_lengths, resample, resample_spacing, StrokePoint};

/// Straw corner finder on an arc-length resampled copy of the stroke.
///
/// Returns indices into `points`.
pub fn straw_corners(points: &[StrokePoint], params: &DetectorParams) -> Vec<usize> {
    let spacing = resample_spacing(
        points,
        params.resampling.points_per_diagonal,
        params.resampling.min_spacing,
    );
    let resampled = resample(points, spacing);
    let corners = resampled_corners(&resampled.points, params);
    resampled.map_indices(&corners)
}

/// Straw corners in resampled index space, including both endpoints.
pub(crate) fn resampled_corners(points: &[StrokePoint], params: &DetectorParams) -> Vec<usize> {
    let n = points.len();
    let w = params.straw.window.max(1);
    let last = n.saturating_sub(1);
    if n < 2 * w + 1 {
        return vec![0, last];
    }

    let straws: Vec<f64> = (w..n - w)
        .map(|i| points[i - w].distance(&points[i + w]))
        .collect();
    let threshold = params.straw.median_percentage * median(&straws);

    let mut corners = vec![0];
    let mut run: Option<(usize, f64)> = None;
    for (k, &s) in straws.iter().enumerate() {
        let i = k + w;
        if s < threshold {
            run = match run {
                Some((_, best)) if best <= s => run,
                _ => Some((i, s)),
            };
        } else if let Some((best_i, _)) = run.take() {
            corners.push(best_i);
        }
    }
    if let Some((best_i, _)) = run {
        corners.push(best_i);
    }
    corners.push(last);
    corners.dedup();

    insert_missed(points, &mut corners, params);
    corners
}

/// Split segments that fail the line test at their tightest straw until every
/// segment passes or nothing more can be inserted.
fn insert_missed(points: &[StrokePoint], corners: &mut Vec<usize>, params: &DetectorParams) {
    let n = points.len();
    let w = params.straw.window.max(1);
    let last = n - 1;
    let full: Vec<f64> = (0..n)
        .map(|i| points[i.saturating_sub(w)].distance(&points[(i + w).min(last)]))
        .collect();
    let lengths = path_lengths(points);

    for _ in 0..n {
        let mut inserted = false;
        for k in 0..corners.len().saturating_sub(1) {
            let (a, b) = (corners[k], corners[k + 1]);
            if params.line_test.passes(points, &lengths, a, b) {
                continue;
            }
            let quarter = (b - a) / 4;
            let lo = (a + quarter).max(a + 1);
            let hi = (b - quarter).min(b - 1);
            if lo > hi {
                continue;
            }
            let mut best = lo;
            for i in lo..=hi {
                if full[i] < full[best] {
                    best = i;
                }
            }
            corners.insert(k + 1, best);
            inserted = true;
            break;
        }
        if !inserted {
            break;
        }
    }
}
