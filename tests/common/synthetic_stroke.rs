use stroke_segmenter::{Stroke, StrokePoint};

/// Sampling interval of the synthetic strokes in milliseconds.
pub const DT_MS: f64 = 10.0;

/// L-shaped stroke: x-leg (0,0)..(9,0) at indices 0-9, y-leg (9,1)..(9,10)
/// at indices 10-19. The only corner is index 9.
pub fn right_angle() -> Stroke {
    let mut xy: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 0.0]).collect();
    xy.extend((1..=10).map(|k| [9.0, k as f64]));
    Stroke::from_xy(&xy, DT_MS).expect("valid stroke")
}

/// L-shaped stroke as a tablet records it: x-leg (0,0)..(9,0) at indices
/// 0-9, y-leg (9,0)..(9,9) at indices 10-19. The pen rests on (9,0) for two
/// samples, so cleaning drops index 10.
pub fn right_angle_literal() -> Stroke {
    let mut xy: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 0.0]).collect();
    xy.extend((0..10).map(|k| [9.0, k as f64]));
    Stroke::from_xy(&xy, DT_MS).expect("valid stroke")
}

/// Straight diagonal stroke with unit steps along x.
pub fn straight_line(n: usize) -> Stroke {
    let xy: Vec<[f64; 2]> = (0..n).map(|i| [i as f64, 0.5 * i as f64]).collect();
    Stroke::from_xy(&xy, DT_MS).expect("valid stroke")
}

/// Horizontal stroke of `n` samples whose middle sample is lifted by `bump` px.
pub fn bumped_line(n: usize, bump: f64) -> Stroke {
    let mid = n / 2;
    let xy: Vec<[f64; 2]> = (0..n)
        .map(|i| [i as f64, if i == mid { bump } else { 0.0 }])
        .collect();
    Stroke::from_xy(&xy, DT_MS).expect("valid stroke")
}

/// Polyline through `vertices` sampled every `step` px, with deterministic
/// jitter of amplitude `noise` px on interior samples.
pub fn polyline(vertices: &[[f64; 2]], step: f64, noise: f64, seed: u64) -> Stroke {
    let mut rng = Lcg(seed);
    let mut points = Vec::new();
    for w in vertices.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
        let steps = (len / step).round().max(1.0) as usize;
        for k in 0..steps {
            let s = k as f64 / steps as f64;
            let jitter = if points.is_empty() { 0.0 } else { noise };
            points.push(StrokePoint::new(
                a[0] + s * (b[0] - a[0]) + jitter * rng.symmetric(),
                a[1] + s * (b[1] - a[1]) + jitter * rng.symmetric(),
                points.len() as f64 * DT_MS,
            ));
        }
    }
    if let Some(last) = vertices.last() {
        points.push(StrokePoint::new(last[0], last[1], points.len() as f64 * DT_MS));
    }
    Stroke::new(points).expect("valid stroke")
}

/// Arc of `sweep` radians on a circle of `radius` px, `n` samples.
pub fn arc(n: usize, radius: f64, sweep: f64) -> Stroke {
    let xy: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let a = sweep * i as f64 / (n - 1) as f64;
            [radius * a.cos(), radius * a.sin()]
        })
        .collect();
    Stroke::from_xy(&xy, DT_MS).expect("valid stroke")
}

/// A handful of differently shaped strokes for property checks.
pub fn assorted() -> Vec<Stroke> {
    vec![
        right_angle(),
        straight_line(30),
        bumped_line(41, 1.0),
        polyline(
            &[[0.0, 0.0], [40.0, 0.0], [40.0, 30.0], [0.0, 30.0]],
            1.0,
            0.3,
            7,
        ),
        polyline(
            &[[0.0, 0.0], [15.0, 25.0], [30.0, 0.0], [45.0, 25.0], [60.0, 0.0]],
            1.5,
            0.5,
            11,
        ),
        arc(60, 25.0, 1.5 * std::f64::consts::PI),
    ]
}

/// Insert a copy of sample `index` right after it, with a later timestamp.
pub fn with_repeated_sample(stroke: &Stroke, index: usize) -> Stroke {
    let mut points = stroke.points().to_vec();
    let mut copy = points[index];
    copy.t += 0.5 * DT_MS;
    points.insert(index + 1, copy);
    for p in points.iter_mut().skip(index + 2) {
        p.t += DT_MS;
    }
    Stroke::new(points).expect("valid stroke")
}

/// Minimal linear congruential generator for reproducible jitter.
struct Lcg(u64);

impl Lcg {
    /// Uniform value in [-1, 1).
    fn symmetric(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}
