//! Diagnostics data model returned by
//! [`Segmenter::segment_with_diagnostics`](crate::Segmenter::segment_with_diagnostics).
//!
//! `SegmentationReport` bundles the segmentation with a `PipelineTrace` that
//! records each detector's candidates, the consensus and refinement outcomes
//! and per-stage timings. Everything serialises to camelCase JSON.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{InputDescriptor, PipelineTrace, SegmentationReport};
pub use stages::{ConsensusStage, DetectorStage, RefinementStage};
pub use timing::{StageTiming, TimingBreakdown};
