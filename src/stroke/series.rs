//! Path-length bookkeeping, the straight-line predicate and windowing.
//!
//! Cumulative path length is the universal position metric of the engine:
//! detectors, the post-filter and the refiner all measure "how far along the
//! stroke" through the array returned by [`path_lengths`].

use super::StrokePoint;
use crate::angle::{angle_between, signed_turn};
use serde::{Deserialize, Serialize};

/// Cumulative Euclidean distance up to each sample; index 0 is 0.0.
pub fn path_lengths(points: &[StrokePoint]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            acc += points[i - 1].distance(p);
        }
        out.push(acc);
    }
    out
}

/// Straight-line test between two samples of a stroke.
///
/// A range is a line when its chord-to-path ratio exceeds `ratio`. Tiny
/// ranges (shorter than `min_length` along the path, or spanning fewer than
/// `min_points` index steps) always count as lines so noise on a handful of
/// samples never produces a "curve" verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineTest {
    pub ratio: f64,
    pub min_length: f64,
    pub min_points: usize,
}

impl Default for LineTest {
    fn default() -> Self {
        Self {
            ratio: 0.95,
            min_length: 4.0,
            min_points: 3,
        }
    }
}

impl LineTest {
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            ..Default::default()
        }
    }

    /// Order of `p1` and `p2` does not matter.
    pub fn passes(
        &self,
        points: &[StrokePoint],
        path_lengths: &[f64],
        p1: usize,
        p2: usize,
    ) -> bool {
        let (a, b) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        if b - a < self.min_points {
            return true;
        }
        let path = path_lengths[b] - path_lengths[a];
        if path < self.min_length || path <= 0.0 {
            return true;
        }
        points[a].distance(&points[b]) / path > self.ratio
    }
}

/// [`LineTest`] with the default size floors and a caller-chosen ratio.
pub fn is_line(
    points: &[StrokePoint],
    p1: usize,
    p2: usize,
    path_lengths: &[f64],
    ratio_threshold: f64,
) -> bool {
    LineTest::with_ratio(ratio_threshold).passes(points, path_lengths, p1, p2)
}

/// Centred window of `size` samples around `i`. Positions running off either
/// end repeat the boundary sample.
pub fn get_window<T: Copy>(data: &[T], size: usize, i: usize) -> Vec<T> {
    if data.is_empty() {
        return Vec::new();
    }
    let last = data.len() as isize - 1;
    let start = i as isize - (size / 2) as isize;
    (0..size as isize)
        .map(|k| data[(start + k).clamp(0, last) as usize])
        .collect()
}

/// Diagonal of the axis-aligned bounding box.
pub fn bounding_diagonal(points: &[StrokePoint]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    ((max_x - min_x).powi(2) + (max_y - min_y).powi(2)).sqrt()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
/// Falls back to the distance to `a` when the chord has no length.
pub fn perpendicular_distance(p: &StrokePoint, a: &StrokePoint, b: &StrokePoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f64::EPSILON {
        return p.distance(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}

#[inline]
pub(crate) fn direction(a: &StrokePoint, b: &StrokePoint) -> [f64; 2] {
    [b.x - a.x, b.y - a.y]
}

/// Unsigned turning angle at sample `i`, using the samples `window` steps
/// before and after it (clamped to the stroke).
pub fn turning_angle(points: &[StrokePoint], i: usize, window: usize) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let window = window.max(1);
    let prev = i.saturating_sub(window);
    let next = (i + window).min(points.len() - 1);
    if prev == i || next == i {
        return 0.0;
    }
    angle_between(
        &direction(&points[prev], &points[i]),
        &direction(&points[i], &points[next]),
    )
}

/// Turning angle of every sample (see [`turning_angle`]).
pub fn turning_angles(points: &[StrokePoint], window: usize) -> Vec<f64> {
    (0..points.len())
        .map(|i| turning_angle(points, i, window))
        .collect()
}

/// Signed direction change at every interior sample; both endpoints are 0.
pub fn direction_changes(points: &[StrokePoint]) -> Vec<f64> {
    let n = points.len();
    let mut out = vec![0.0; n];
    for i in 1..n.saturating_sub(1) {
        out[i] = signed_turn(
            &direction(&points[i - 1], &points[i]),
            &direction(&points[i], &points[i + 1]),
        );
    }
    out
}

/// Median of a slice; 0.0 when empty.
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let m = sorted.len();
    if m % 2 == 1 {
        sorted[m / 2]
    } else {
        0.5 * (sorted[m / 2 - 1] + sorted[m / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn arc(n: usize, radius: f64, sweep: f64) -> Vec<StrokePoint> {
        (0..n)
            .map(|i| {
                let a = sweep * i as f64 / (n - 1) as f64;
                StrokePoint::new(radius * a.cos(), radius * a.sin(), i as f64)
            })
            .collect()
    }

    #[test]
    fn path_lengths_accumulate_from_zero() {
        let pts = [
            StrokePoint::new(0.0, 0.0, 0.0),
            StrokePoint::new(3.0, 4.0, 1.0),
            StrokePoint::new(3.0, 6.0, 2.0),
        ];
        let pl = path_lengths(&pts);
        assert_eq!(pl, vec![0.0, 5.0, 7.0]);
    }

    #[test]
    fn get_window_repeats_boundary_values() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(get_window(&data, 3, 0), vec![1, 1, 2]);
        assert_eq!(get_window(&data, 3, 4), vec![4, 5, 5]);
        assert_eq!(get_window(&data, 3, 2), vec![2, 3, 4]);
        assert_eq!(get_window(&data, 5, 0), vec![1, 1, 1, 2, 3]);
        assert!(get_window::<i32>(&[], 3, 0).is_empty());
    }

    #[test]
    fn is_line_separates_lines_from_arcs() {
        let line: Vec<StrokePoint> = (0..20)
            .map(|i| StrokePoint::new(i as f64, 0.5 * i as f64, i as f64))
            .collect();
        let pl = path_lengths(&line);
        assert!(is_line(&line, 0, 19, &pl, 0.95));

        let half_circle = arc(40, 20.0, std::f64::consts::PI);
        let pl = path_lengths(&half_circle);
        assert!(!is_line(&half_circle, 0, 39, &pl, 0.95));
    }

    #[test]
    fn is_line_floors_accept_tiny_ranges() {
        let half_circle = arc(40, 20.0, std::f64::consts::PI);
        let pl = path_lengths(&half_circle);
        // Two index steps: below the point-count floor.
        assert!(is_line(&half_circle, 10, 12, &pl, 0.9999));
        let strict = LineTest {
            ratio: 0.9999,
            min_length: 0.0,
            min_points: 0,
        };
        assert!(!strict.passes(&half_circle, &pl, 0, 39));
    }

    #[test]
    fn is_line_is_symmetric_under_reversal() {
        let stroke = Stroke::new(arc(30, 15.0, 1.2)).unwrap();
        let rev = stroke.reversed();
        let pl = stroke.path_lengths();
        let pl_rev = rev.path_lengths();
        let n = stroke.len();
        for &(a, b) in &[(0, 29), (3, 17), (10, 11), (5, 25)] {
            let forward = is_line(stroke.points(), a, b, &pl, 0.95);
            assert_eq!(forward, is_line(stroke.points(), b, a, &pl, 0.95));
            let backward = is_line(rev.points(), n - 1 - a, n - 1 - b, &pl_rev, 0.95);
            assert_eq!(forward, backward, "range {a}..{b}");
        }
    }

    #[test]
    fn turning_angle_at_right_angle() {
        let pts = [
            StrokePoint::new(0.0, 0.0, 0.0),
            StrokePoint::new(1.0, 0.0, 1.0),
            StrokePoint::new(1.0, 1.0, 2.0),
        ];
        assert!(approx_eq(turning_angle(&pts, 1, 1), std::f64::consts::FRAC_PI_2));
        assert!(approx_eq(turning_angle(&pts, 0, 1), 0.0));
        let dc = direction_changes(&pts);
        assert!(approx_eq(dc[1], std::f64::consts::FRAC_PI_2));
        assert_eq!(dc[0], 0.0);
    }

    #[test]
    fn perpendicular_distance_handles_zero_chord() {
        let a = StrokePoint::new(0.0, 0.0, 0.0);
        let b = StrokePoint::new(10.0, 0.0, 1.0);
        let p = StrokePoint::new(5.0, 3.0, 2.0);
        assert!(approx_eq(perpendicular_distance(&p, &a, &b), 3.0));
        assert!(approx_eq(perpendicular_distance(&p, &a, &a), p.distance(&a)));
    }

    #[test]
    fn median_of_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
