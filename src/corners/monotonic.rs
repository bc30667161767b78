use super::options::{DetectorParams, MonotonicParams};
use crate::stroke::series::direction_changes;
use crate::stroke::{resample, resample_spacing, StrokePoint};

/// Monotonic-curvature corner finder. Returns indices into `points`.
pub fn monotonic_corners(points: &[StrokePoint], params: &DetectorParams) -> Vec<usize> {
    let spacing = resample_spacing(
        points,
        params.resampling.points_per_diagonal,
        params.resampling.min_spacing,
    );
    let resampled = resample(points, spacing);
    let changes = direction_changes(&resampled.points);
    let curvature = monotonic_curvature(&changes, params.monotonic.window);
    let peaks = curvature_peaks(&curvature, &params.monotonic);
    resampled.map_indices(&peaks)
}

/// Direction change at each sample accumulated over the neighbours that keep
/// its sign and do not grow in magnitude, up to `window` samples each side.
pub fn monotonic_curvature(changes: &[f64], window: usize) -> Vec<f64> {
    let n = changes.len();
    (0..n)
        .map(|i| {
            let centre = changes[i];
            if centre == 0.0 {
                return 0.0;
            }
            let mut total = centre;
            let mut prev = centre.abs();
            for k in 1..=window.min(i) {
                let v = changes[i - k];
                if v * centre <= 0.0 || v.abs() > prev {
                    break;
                }
                total += v;
                prev = v.abs();
            }
            prev = centre.abs();
            for k in 1..=window {
                let Some(&v) = changes.get(i + k) else {
                    break;
                };
                if v * centre <= 0.0 || v.abs() > prev {
                    break;
                }
                total += v;
                prev = v.abs();
            }
            total
        })
        .collect()
}

/// Local |curvature| maxima above the detection threshold, with both endpoints.
fn curvature_peaks(curvature: &[f64], params: &MonotonicParams) -> Vec<usize> {
    let n = curvature.len();
    let last = n.saturating_sub(1);
    let max_abs = curvature.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    let threshold = (params.extrema_ratio * max_abs).max(params.min_curvature);
    let mut peaks = vec![0];
    for i in 1..last {
        let c = curvature[i].abs();
        if c > threshold && c >= curvature[i - 1].abs() && c > curvature[i + 1].abs() {
            peaks.push(i);
        }
    }
    peaks.push(last);
    peaks.dedup();
    peaks
}
