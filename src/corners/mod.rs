//! Corner detectors.
//!
//! Four independent strategies propose corner indices on the same cleaned
//! stroke:
//!
//! - Extremal distance: recursive chord splitting driven by an explicit stack.
//! - Straw: short "straws" across a resampled stroke mark tight turns.
//! - Monotonicity: peaks of a windowed, sign-consistent direction change.
//! - Speed + curvature: slow, strongly turning samples.
//!
//! Every detector hands its raw indices to [`postfilter::finalize`], so all of
//! them return sorted, unique candidates that start at 0 and end at the last
//! sample.

pub mod extremal;
pub mod monotonic;
pub mod options;
pub mod postfilter;
pub mod speed;
pub mod straw;

pub use options::{
    DetectorParams, ExtremalParams, MonotonicParams, PostFilterParams, ResampleParams,
    SpeedParams, StrawParams,
};

use crate::stroke::StrokePoint;
use serde::{Deserialize, Serialize};

/// Corner-finding strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    ExtremalDistance,
    Straw,
    Monotonicity,
    SpeedCurvature,
}

impl Detector {
    pub const ALL: [Detector; 4] = [
        Detector::ExtremalDistance,
        Detector::Straw,
        Detector::Monotonicity,
        Detector::SpeedCurvature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Detector::ExtremalDistance => "extremal_distance",
            Detector::Straw => "straw",
            Detector::Monotonicity => "monotonicity",
            Detector::SpeedCurvature => "speed_curvature",
        }
    }

    /// Run the detector on a cleaned stroke.
    pub fn detect(&self, points: &[StrokePoint], params: &DetectorParams) -> Candidates {
        let n = points.len();
        if n < 3 {
            let mut indices = vec![0, n.saturating_sub(1)];
            indices.dedup();
            return Candidates {
                detector: *self,
                indices,
            };
        }
        let raw = match self {
            Detector::ExtremalDistance => extremal::extremal_corners(points, &params.extremal),
            Detector::Straw => straw::straw_corners(points, params),
            Detector::Monotonicity => monotonic::monotonic_corners(points, params),
            Detector::SpeedCurvature => speed::speed_corners(points, &params.speed),
        };
        let indices = postfilter::finalize(points, &raw, &params.postfilter, &params.line_test);
        log::debug!(
            "{}: {} raw candidates -> {} corners",
            self.name(),
            raw.len(),
            indices.len()
        );
        Candidates {
            detector: *self,
            indices,
        }
    }
}

/// Corner indices proposed by one detector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidates {
    pub detector: Detector,
    pub indices: Vec<usize>,
}

impl Candidates {
    /// Interior corners only.
    pub fn interior(&self) -> &[usize] {
        let len = self.indices.len();
        if len <= 2 {
            &[]
        } else {
            &self.indices[1..len - 1]
        }
    }
}
