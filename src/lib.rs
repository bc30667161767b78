#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod segmenter;
pub mod stroke;
pub mod types;

// Building blocks of the pipeline; public for tools and experiments.
pub mod angle;
pub mod consensus;
pub mod corners;
pub mod fit;
pub mod refine;

// --- High-level re-exports -------------------------------------------------

// Main entry points: segmenter + results.
pub use crate::error::SegmentError;
pub use crate::segmenter::{segment, Segmenter, SegmenterParams, SHORT_STROKE_CONFIDENCE};
pub use crate::stroke::{Stroke, StrokePoint};
pub use crate::types::{Algorithm, Segment, Segmentation};

// High-level diagnostics returned by the segmenter.
pub use crate::diagnostics::{PipelineTrace, SegmentationReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use stroke_segmenter::prelude::*;
///
/// # fn main() -> Result<(), SegmentError> {
/// let xy = [[0.0, 0.0], [5.0, 0.0], [10.0, 0.0], [10.0, 5.0], [10.0, 10.0]];
/// let stroke = Stroke::from_xy(&xy, 10.0)?;
/// let segmenter = Segmenter::new(SegmenterParams::default())?;
/// let report = segmenter.segment_with_diagnostics(&stroke, Algorithm::Consensus);
/// println!(
///     "corners={:?} latency_ms={:.3}",
///     report.segmentation.corners(),
///     report.trace.timings.total_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        segment, Algorithm, SegmentError, Segmentation, Segmenter, SegmenterParams, Stroke,
        StrokePoint,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::consensus::{combine, Consensus, ConsensusParams};
    pub use crate::corners::{Candidates, Detector, DetectorParams};
    pub use crate::fit::{FitEvaluator, FitParams, SegmentCost};
    pub use crate::refine::{RefineOutcome, RefineParams, Refiner};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        ConsensusStage, DetectorStage, InputDescriptor, RefinementStage, StageTiming,
        TimingBreakdown,
    };
}
