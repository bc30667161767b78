use super::{ConsensusStage, DetectorStage, RefinementStage, TimingBreakdown};
use crate::types::{Algorithm, Segmentation};
use serde::Serialize;

/// Result produced by [`Segmenter::segment_with_diagnostics`](crate::Segmenter).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub segmentation: Segmentation,
    pub trace: PipelineTrace,
}

/// What the pipeline did to produce a segmentation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub algorithm: Algorithm,
    pub timings: TimingBreakdown,
    /// The stroke was below the size floor and was not analysed.
    pub short_stroke: bool,
    pub detectors: Vec<DetectorStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinement: Option<RefinementStage>,
    /// Final corners before mapping back to the caller's stroke.
    pub cleaned_corners: Vec<usize>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub points: usize,
    pub cleaned_points: usize,
    pub path_length: f64,
    pub bounding_diagonal: f64,
}
