//! Parameter tree of the whole segmentation engine.
//!
//! Every threshold of every stage lives here with its default. The tree
//! deserialises from partial JSON (missing fields keep their defaults) and is
//! checked once by [`SegmenterParams::validate`] before a run.

use crate::consensus::ConsensusParams;
use crate::corners::DetectorParams;
use crate::error::{Result, SegmentError};
use crate::fit::FitParams;
use crate::refine::RefineParams;
use crate::stroke::SignalFilter;
use serde::{Deserialize, Serialize};

/// Engine-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    pub detectors: DetectorParams,
    pub consensus: ConsensusParams,
    pub refine: RefineParams,
    pub fit: FitParams,
    /// Cleaned strokes with fewer samples are returned as one segment.
    pub short_stroke_points: usize,
    /// Strokes shorter than this path length (px) are returned as one segment.
    pub short_stroke_length: f64,
    /// Run detectors on the rayon pool when the `parallel` feature is enabled.
    pub parallel_detectors: bool,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            detectors: DetectorParams::default(),
            consensus: ConsensusParams::default(),
            refine: RefineParams::default(),
            fit: FitParams::default(),
            short_stroke_points: 5,
            short_stroke_length: 10.0,
            parallel_detectors: true,
        }
    }
}

/// Finest consensus grid, in index units.
pub const MIN_GRID_STEP: f64 = 1e-3;
/// Smallest resampling spacing, in pixels.
pub const MIN_RESAMPLE_SPACING: f64 = 1e-3;
/// Densest resampling relative to the bounding-box diagonal.
pub const MAX_POINTS_PER_DIAGONAL: f64 = 1000.0;

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SegmentError::invalid(name, format!("must be > 0, got {value}")))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SegmentError::invalid(name, format!("must be >= 0, got {value}")))
    }
}

fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SegmentError::invalid(
            name,
            format!("must lie in [{min}, {max}], got {value}"),
        ))
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SegmentError::invalid(
            name,
            format!("must lie in [0, 1], got {value}"),
        ))
    }
}

fn at_least(name: &'static str, value: usize, min: usize) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        Err(SegmentError::invalid(
            name,
            format!("must be >= {min}, got {value}"),
        ))
    }
}

fn filter_window(name: &'static str, filter: &SignalFilter) -> Result<()> {
    match filter.window() {
        Some(w) => at_least(name, w, 1),
        None => Ok(()),
    }
}

impl SegmenterParams {
    /// Reject thresholds no stage can work with. Nothing is corrected.
    pub fn validate(&self) -> Result<()> {
        let d = &self.detectors;
        unit_interval("detectors.line_test.ratio", d.line_test.ratio)?;
        positive("detectors.line_test.ratio", d.line_test.ratio)?;
        non_negative("detectors.line_test.min_length", d.line_test.min_length)?;
        in_range(
            "detectors.resampling.points_per_diagonal",
            d.resampling.points_per_diagonal,
            1.0,
            MAX_POINTS_PER_DIAGONAL,
        )?;
        in_range(
            "detectors.resampling.min_spacing",
            d.resampling.min_spacing,
            MIN_RESAMPLE_SPACING,
            f64::MAX,
        )?;
        non_negative("detectors.extremal.distance_ratio", d.extremal.distance_ratio)?;
        at_least("detectors.straw.window", d.straw.window, 1)?;
        positive(
            "detectors.straw.median_percentage",
            d.straw.median_percentage,
        )?;
        unit_interval(
            "detectors.monotonic.extrema_ratio",
            d.monotonic.extrema_ratio,
        )?;
        non_negative(
            "detectors.monotonic.min_curvature",
            d.monotonic.min_curvature,
        )?;
        positive("detectors.speed.speed_ratio", d.speed.speed_ratio)?;
        non_negative("detectors.speed.min_curvature", d.speed.min_curvature)?;
        at_least("detectors.speed.turning_window", d.speed.turning_window, 1)?;
        filter_window("detectors.speed.speed_filter", &d.speed.speed_filter)?;
        filter_window(
            "detectors.speed.curvature_filter",
            &d.speed.curvature_filter,
        )?;
        non_negative("detectors.postfilter.hook_ratio", d.postfilter.hook_ratio)?;
        non_negative(
            "detectors.postfilter.similar_ratio",
            d.postfilter.similar_ratio,
        )?;
        if !(0.0..=180.0).contains(&d.postfilter.collinear_angle_deg) {
            return Err(SegmentError::invalid(
                "detectors.postfilter.collinear_angle_deg",
                format!(
                    "must lie in [0, 180], got {}",
                    d.postfilter.collinear_angle_deg
                ),
            ));
        }

        positive("consensus.bandwidth", self.consensus.bandwidth)?;
        in_range(
            "consensus.grid_step",
            self.consensus.grid_step,
            MIN_GRID_STEP,
            f64::MAX,
        )?;
        non_negative("consensus.grid_padding", self.consensus.grid_padding)?;
        unit_interval("consensus.min_support", self.consensus.min_support)?;

        positive("refine.ratio_step", self.refine.ratio_step)?;
        positive("refine.merge_slack", self.refine.merge_slack)?;
        positive("refine.error_growth", self.refine.error_growth)?;
        at_least("refine.max_iterations", self.refine.max_iterations, 1)?;
        unit_interval(
            "refine.non_convergence_penalty",
            self.refine.non_convergence_penalty,
        )?;

        at_least("fit.poly_degree", self.fit.poly_degree, 1)?;
        non_negative("short_stroke_length", self.short_stroke_length)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SegmenterParams::default().validate(), Ok(()));
    }

    #[test]
    fn bad_values_name_the_field() {
        let mut params = SegmenterParams::default();
        params.consensus.bandwidth = 0.0;
        match params.validate() {
            Err(SegmentError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "consensus.bandwidth")
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut params = SegmenterParams::default();
        params.detectors.line_test.ratio = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = SegmenterParams::default();
        params.detectors.speed.curvature_filter = SignalFilter::Mean(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn allocation_driving_settings_are_bounded() {
        let mut params = SegmenterParams::default();
        params.consensus.grid_step = 1e-7;
        match params.validate() {
            Err(SegmentError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "consensus.grid_step")
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut params = SegmenterParams::default();
        params.detectors.resampling.min_spacing = 1e-9;
        assert!(params.validate().is_err());

        let mut params = SegmenterParams::default();
        params.detectors.resampling.points_per_diagonal = 1e9;
        assert!(params.validate().is_err());

        let mut params = SegmenterParams::default();
        params.consensus.grid_step = MIN_GRID_STEP;
        params.detectors.resampling.min_spacing = MIN_RESAMPLE_SPACING;
        params.detectors.resampling.points_per_diagonal = MAX_POINTS_PER_DIAGONAL;
        assert_eq!(params.validate(), Ok(()));

        let mut params = SegmenterParams::default();
        params.detectors.speed.turning_window = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SegmenterParams = serde_json::from_str(
            r#"{"refine": {"max_iterations": 7}, "parallel_detectors": false}"#,
        )
        .unwrap();
        assert_eq!(params.refine.max_iterations, 7);
        assert_eq!(params.refine.merge_slack, 1.1);
        assert!(!params.parallel_detectors);
        assert_eq!(params.short_stroke_points, 5);
    }
}
