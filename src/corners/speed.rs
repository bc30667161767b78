use super::options::SpeedParams;
use crate::stroke::series::turning_angles;
use crate::stroke::StrokePoint;

/// Pen speed at each sample from central differences (one-sided at the ends),
/// in pixels per millisecond.
pub fn speeds(points: &[StrokePoint]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = i.saturating_sub(1);
            let b = (i + 1).min(n - 1);
            let dt = points[b].t - points[a].t;
            if dt > 0.0 {
                points[a].distance(&points[b]) / dt
            } else {
                0.0
            }
        })
        .collect()
}

/// Speed + curvature corner finder. Returns indices into `points`.
pub fn speed_corners(points: &[StrokePoint], params: &SpeedParams) -> Vec<usize> {
    let n = points.len();
    let last = n - 1;
    let speed = params.speed_filter.apply(&speeds(points));
    let turning = turning_angles(points, params.turning_window);
    let curvature = params.curvature_filter.apply(&turning);
    let mean_speed = speed.iter().sum::<f64>() / n as f64;
    let mean_curvature = curvature.iter().sum::<f64>() / n as f64;
    let speed_limit = params.speed_ratio * mean_speed;

    let qualifies = |i: usize| {
        speed[i] < speed_limit
            && curvature[i] > params.min_curvature
            && curvature[i] > mean_curvature
    };

    let mut corners = vec![0];
    let mut run: Option<usize> = None;
    for i in 1..last {
        if qualifies(i) {
            run = match run {
                Some(best)
                    if speed[best] < speed[i]
                        || (speed[best] == speed[i] && curvature[best] >= curvature[i]) =>
                {
                    Some(best)
                }
                _ => Some(i),
            };
        } else if let Some(best) = run.take() {
            corners.push(best);
        }
    }
    if let Some(best) = run {
        corners.push(best);
    }
    corners.push(last);
    corners
}
