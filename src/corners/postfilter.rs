//! Clean-up shared by every detector: hook removal, merging of near
//! duplicates and removal of corners joining two collinear segments.

use super::options::PostFilterParams;
use crate::angle::angle_between;
use crate::stroke::series::{bounding_diagonal, direction, turning_angle};
use crate::stroke::{path_lengths, LineTest, StrokePoint};

/// Filter raw corner indices of `points`. The result is sorted, unique and
/// always holds the first and last index.
pub fn finalize(
    points: &[StrokePoint],
    raw: &[usize],
    params: &PostFilterParams,
    line_test: &LineTest,
) -> Vec<usize> {
    let n = points.len();
    if n < 2 {
        return vec![0];
    }
    let last = n - 1;
    let lengths = path_lengths(points);
    let total = lengths[last];
    let diagonal = bounding_diagonal(points);
    let hook = params.hook_ratio * diagonal;

    let mut corners: Vec<usize> = raw
        .iter()
        .copied()
        .filter(|&c| c > 0 && c < last)
        .filter(|&c| lengths[c] >= hook && total - lengths[c] >= hook)
        .collect();
    corners.sort_unstable();
    corners.dedup();
    corners.insert(0, 0);
    corners.push(last);

    merge_similar(points, &lengths, &mut corners, params, diagonal);
    remove_collinear(points, &lengths, &mut corners, params, line_test);
    corners
}

fn merge_similar(
    points: &[StrokePoint],
    lengths: &[f64],
    corners: &mut Vec<usize>,
    params: &PostFilterParams,
    diagonal: f64,
) {
    let min_gap = params.similar_ratio * diagonal;
    let mut i = 0;
    while i + 1 < corners.len() {
        let (a, b) = (corners[i], corners[i + 1]);
        let close = b - a < params.similar_points || lengths[b] - lengths[a] < min_gap;
        if !close || corners.len() == 2 {
            i += 1;
            continue;
        }
        if i == 0 {
            corners.remove(1);
        } else if i + 1 == corners.len() - 1 {
            corners.remove(i);
        } else {
            let ca = turning_angle(points, a, params.curvature_window);
            let cb = turning_angle(points, b, params.curvature_window);
            if ca < cb {
                corners.remove(i);
            } else {
                corners.remove(i + 1);
            }
        }
        i = i.saturating_sub(1);
    }
}

fn remove_collinear(
    points: &[StrokePoint],
    lengths: &[f64],
    corners: &mut Vec<usize>,
    params: &PostFilterParams,
    line_test: &LineTest,
) {
    let max_angle = params.collinear_angle_deg.to_radians();
    loop {
        let found = (1..corners.len().saturating_sub(1)).find(|&k| {
            let (p, c, q) = (corners[k - 1], corners[k], corners[k + 1]);
            line_test.passes(points, lengths, p, c)
                && line_test.passes(points, lengths, c, q)
                && angle_between(
                    &direction(&points[p], &points[c]),
                    &direction(&points[c], &points[q]),
                ) < max_angle
        });
        match found {
            Some(k) => {
                corners.remove(k);
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<StrokePoint> {
        (0..n)
            .map(|i| StrokePoint::new(i as f64, 0.0, i as f64))
            .collect()
    }

    fn right_angle() -> Vec<StrokePoint> {
        let mut pts: Vec<StrokePoint> = (0..10)
            .map(|i| StrokePoint::new(i as f64, 0.0, i as f64))
            .collect();
        pts.extend((1..=10).map(|k| StrokePoint::new(9.0, k as f64, (9 + k) as f64)));
        pts
    }

    #[test]
    fn hooks_near_endpoints_are_dropped() {
        let mut pts: Vec<StrokePoint> = (0..=50)
            .map(|i| StrokePoint::new(i as f64, 0.0, i as f64))
            .collect();
        pts.extend((1..=50).map(|k| StrokePoint::new(50.0, k as f64, (50 + k) as f64)));
        let params = PostFilterParams {
            similar_points: 0,
            similar_ratio: 0.0,
            collinear_angle_deg: 0.0,
            ..Default::default()
        };
        // Hook distance is 0.05 * 70.7 px.
        let out = finalize(&pts, &[2, 5, 50, 98], &params, &LineTest::default());
        assert_eq!(out, vec![0, 5, 50, 100]);
    }

    #[test]
    fn corners_next_to_endpoints_fold_into_them() {
        let pts = right_angle();
        let params = PostFilterParams::default();
        assert_eq!(
            finalize(&pts, &[0, 9, 19], &params, &LineTest::default()),
            vec![0, 9, 19]
        );
        assert_eq!(
            finalize(&pts, &[1, 9, 18], &params, &LineTest::default()),
            vec![0, 9, 19]
        );
    }

    #[test]
    fn close_corners_keep_sharper_one() {
        let pts = right_angle();
        let out = finalize(&pts, &[8, 9], &PostFilterParams::default(), &LineTest::default());
        assert_eq!(out, vec![0, 9, 19]);
        let out = finalize(&pts, &[9, 10], &PostFilterParams::default(), &LineTest::default());
        assert_eq!(out, vec![0, 9, 19]);
    }

    #[test]
    fn collinear_corner_is_removed() {
        let pts = line(20);
        let out = finalize(&pts, &[7, 13], &PostFilterParams::default(), &LineTest::default());
        assert_eq!(out, vec![0, 19]);
    }

    #[test]
    fn output_always_has_endpoints() {
        let pts = line(5);
        assert_eq!(
            finalize(&pts, &[], &PostFilterParams::default(), &LineTest::default()),
            vec![0, 4]
        );
    }
}
