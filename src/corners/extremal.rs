use super::options::ExtremalParams;
use crate::stroke::series::perpendicular_distance;
use crate::stroke::StrokePoint;

/// Chord-splitting corner finder.
///
/// The anchor starts at the first sample and the floater at the last. The
/// interior sample farthest from the anchor-floater chord becomes a corner
/// when it lies more than `distance_ratio * chord` away; it then becomes the
/// new floater while the previous one waits on the stack. Otherwise the anchor
/// jumps to the floater and the next floater is popped.
pub fn extremal_corners(points: &[StrokePoint], params: &ExtremalParams) -> Vec<usize> {
    let last = points.len() - 1;
    let mut corners = vec![0, last];
    let mut floaters = vec![last];
    let mut anchor = 0;

    while let Some(&floater) = floaters.last() {
        if floater <= anchor + 1 {
            anchor = floater;
            floaters.pop();
            continue;
        }
        let a = &points[anchor];
        let f = &points[floater];
        let mut best = anchor + 1;
        let mut best_dist = f64::NEG_INFINITY;
        for (i, p) in points.iter().enumerate().take(floater).skip(anchor + 1) {
            let d = perpendicular_distance(p, a, f);
            if d > best_dist {
                best = i;
                best_dist = d;
            }
        }
        let threshold = params.distance_ratio * a.distance(f);
        if best_dist > threshold {
            corners.push(best);
            floaters.push(best);
        } else {
            anchor = floater;
            floaters.pop();
        }
    }

    corners.sort_unstable();
    corners.dedup();
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_yields_every_vertex() {
        let vertices = [[0.0, 0.0], [10.0, 10.0], [20.0, 0.0], [30.0, 10.0]];
        let mut pts = Vec::new();
        for w in vertices.windows(2) {
            for k in 0..10 {
                let s = k as f64 / 10.0;
                pts.push(StrokePoint::new(
                    w[0][0] + s * (w[1][0] - w[0][0]),
                    w[0][1] + s * (w[1][1] - w[0][1]),
                    pts.len() as f64,
                ));
            }
        }
        pts.push(StrokePoint::new(30.0, 10.0, pts.len() as f64));
        let corners = extremal_corners(&pts, &ExtremalParams::default());
        assert_eq!(corners, vec![0, 10, 20, 30]);
    }

    #[test]
    fn closed_loop_splits_on_zero_chord() {
        let pts: Vec<StrokePoint> = (0..=12)
            .map(|i| {
                let a = 2.0 * std::f64::consts::PI * i as f64 / 12.0;
                StrokePoint::new(5.0 * a.cos(), 5.0 * a.sin(), i as f64)
            })
            .collect();
        let corners = extremal_corners(&pts, &ExtremalParams::default());
        assert!(corners.contains(&6), "corners = {corners:?}");
        assert_eq!(corners.first(), Some(&0));
        assert_eq!(corners.last(), Some(&12));
    }
}
