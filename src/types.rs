use crate::corners::Detector;
use crate::stroke::StrokePoint;
use serde::{Deserialize, Serialize};

/// Segmentation strategy exposed to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    ExtremalDistance,
    Straw,
    Monotonicity,
    SpeedCurvature,
    /// All detectors reconciled by kernel density consensus.
    Consensus,
    /// Consensus followed by merge refinement.
    Refined,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::ExtremalDistance,
        Algorithm::Straw,
        Algorithm::Monotonicity,
        Algorithm::SpeedCurvature,
        Algorithm::Consensus,
        Algorithm::Refined,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::ExtremalDistance => "extremal_distance",
            Algorithm::Straw => "straw",
            Algorithm::Monotonicity => "monotonicity",
            Algorithm::SpeedCurvature => "speed_curvature",
            Algorithm::Consensus => "consensus",
            Algorithm::Refined => "refined",
        }
    }

    /// Detectors the algorithm runs.
    pub fn detectors(&self) -> &'static [Detector] {
        match self {
            Algorithm::ExtremalDistance => &[Detector::ExtremalDistance],
            Algorithm::Straw => &[Detector::Straw],
            Algorithm::Monotonicity => &[Detector::Monotonicity],
            Algorithm::SpeedCurvature => &[Detector::SpeedCurvature],
            Algorithm::Consensus | Algorithm::Refined => &Detector::ALL,
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown algorithm '{s}'"))
    }
}

/// Inclusive sub-range `start..=end` of the caller's stroke.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub points: Vec<StrokePoint>,
}

/// Ordered segments covering the whole stroke. Consecutive segments share
/// their boundary sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segmentation {
    pub algorithm: Algorithm,
    /// In [0, 1].
    pub confidence: f64,
    pub segments: Vec<Segment>,
}

impl Segmentation {
    /// Split `points` at `corners`, which must be sorted, unique and hold both
    /// endpoints.
    pub(crate) fn from_corners(
        points: &[StrokePoint],
        corners: &[usize],
        algorithm: Algorithm,
        confidence: f64,
    ) -> Self {
        let segments = corners
            .windows(2)
            .map(|w| Segment {
                start: w[0],
                end: w[1],
                points: points[w[0]..=w[1]].to_vec(),
            })
            .collect();
        Self {
            algorithm,
            confidence: confidence.clamp(0.0, 1.0),
            segments,
        }
    }

    /// Segment boundaries, starting at 0 and ending at the last sample.
    pub fn corners(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.segments.iter().map(|s| s.start).collect();
        if let Some(last) = self.segments.last() {
            out.push(last.end);
        }
        out
    }

    /// Number of corners including both endpoints.
    pub fn corner_count(&self) -> usize {
        self.segments.len() + 1
    }

    pub fn segment_points(&self) -> Vec<&[StrokePoint]> {
        self.segments.iter().map(|s| s.points.as_slice()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_share_boundaries() {
        let pts: Vec<StrokePoint> = (0..6)
            .map(|i| StrokePoint::new(i as f64, 0.0, i as f64))
            .collect();
        let seg = Segmentation::from_corners(&pts, &[0, 2, 5], Algorithm::Straw, 1.2);
        assert_eq!(seg.corners(), vec![0, 2, 5]);
        assert_eq!(seg.corner_count(), 3);
        assert_eq!(seg.confidence, 1.0);
        let parts = seg.segment_points();
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 4);
        assert_eq!(parts[0].last(), parts[1].first());
    }

    #[test]
    fn algorithm_parses_from_name() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert!("zigzag".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Refined.detectors().len(), 4);
    }
}
