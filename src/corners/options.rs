use crate::stroke::{LineTest, SignalFilter};
use serde::{Deserialize, Serialize};

/// Extremal-distance detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremalParams {
    /// A point becomes a corner when its distance to the anchor-floater chord
    /// exceeds this fraction of the chord length.
    pub distance_ratio: f64,
}

impl Default for ExtremalParams {
    fn default() -> Self {
        Self {
            distance_ratio: 0.1,
        }
    }
}

/// Straw detector (runs on the resampled stroke).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrawParams {
    /// Half-width of a straw in resampled samples.
    pub window: usize,
    /// Straws shorter than this fraction of the median straw mark corners.
    pub median_percentage: f64,
}

impl Default for StrawParams {
    fn default() -> Self {
        Self {
            window: 3,
            median_percentage: 0.95,
        }
    }
}

/// Monotonic-curvature detector (runs on the resampled stroke).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonotonicParams {
    /// Maximum samples the curvature window extends to either side.
    pub window: usize,
    /// Candidates must exceed this fraction of the largest |curvature|.
    pub extrema_ratio: f64,
    /// Absolute curvature floor in radians.
    pub min_curvature: f64,
}

impl Default for MonotonicParams {
    fn default() -> Self {
        Self {
            window: 3,
            extrema_ratio: 0.25,
            min_curvature: 0.1,
        }
    }
}

/// Speed + curvature detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedParams {
    /// Samples slower than this fraction of the mean speed are candidates.
    pub speed_ratio: f64,
    /// Absolute curvature floor in radians.
    pub min_curvature: f64,
    /// Neighbour offset of the turning angle; wider windows ignore
    /// single-sample jitter.
    pub turning_window: usize,
    pub speed_filter: SignalFilter,
    pub curvature_filter: SignalFilter,
}

impl Default for SpeedParams {
    fn default() -> Self {
        Self {
            speed_ratio: 0.9,
            min_curvature: 0.15,
            turning_window: 2,
            speed_filter: SignalFilter::None,
            curvature_filter: SignalFilter::Mean(3),
        }
    }
}

/// Clean-up applied to every detector's raw candidates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilterParams {
    /// Corners closer than this fraction of the bounding diagonal (path
    /// distance) to either endpoint are dropped as pen hooks.
    pub hook_ratio: f64,
    /// Neighbouring corners fewer than this many indices apart are merged.
    pub similar_points: usize,
    /// Neighbouring corners closer than this fraction of the diagonal (path
    /// distance) are merged.
    pub similar_ratio: f64,
    /// Corners between two straight segments turning less than this are dropped.
    pub collinear_angle_deg: f64,
    /// Neighbour offset used for the curvature tie-break when merging.
    pub curvature_window: usize,
}

impl Default for PostFilterParams {
    fn default() -> Self {
        Self {
            hook_ratio: 0.05,
            similar_points: 3,
            similar_ratio: 0.04,
            collinear_angle_deg: 15.0,
            curvature_window: 2,
        }
    }
}

/// Parameters shared by all corner detectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub extremal: ExtremalParams,
    pub straw: StrawParams,
    pub monotonic: MonotonicParams,
    pub speed: SpeedParams,
    pub postfilter: PostFilterParams,
    /// Straight-line test used by the post-filter, the straw insertion pass
    /// and the refiner.
    pub line_test: LineTest,
    pub resampling: ResampleParams,
}

/// Spacing of the arc-length resampling used by the straw and monotonicity
/// detectors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleParams {
    pub points_per_diagonal: f64,
    pub min_spacing: f64,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            points_per_diagonal: 40.0,
            min_spacing: 1.0,
        }
    }
}
