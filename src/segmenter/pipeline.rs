use super::params::SegmenterParams;
use crate::consensus::combine;
use crate::corners::{Candidates, Detector, DetectorParams};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    ConsensusStage, DetectorStage, InputDescriptor, PipelineTrace, RefinementStage,
    SegmentationReport, TimingBreakdown,
};
use crate::error::Result;
use crate::fit::{FitEvaluator, SegmentCost};
use crate::refine::Refiner;
use crate::stroke::{path_lengths, series, Stroke, StrokePoint};
use crate::types::{Algorithm, Segmentation};
use log::debug;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Confidence reported for strokes too short to analyse.
pub const SHORT_STROKE_CONFIDENCE: f64 = 1.0;

/// Segmentation engine bound to a validated parameter set.
#[derive(Clone, Debug)]
pub struct Segmenter {
    params: SegmenterParams,
}

impl Segmenter {
    pub fn new(params: SegmenterParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    pub fn segment(&self, stroke: &Stroke, algorithm: Algorithm) -> Segmentation {
        run(stroke, algorithm, &self.params).segmentation
    }

    /// Segment and report what every stage produced.
    pub fn segment_with_diagnostics(
        &self,
        stroke: &Stroke,
        algorithm: Algorithm,
    ) -> SegmentationReport {
        run(stroke, algorithm, &self.params)
    }
}

/// Segment `stroke` with `algorithm`. Fails only on invalid parameters; the
/// stroke itself was validated when it was built.
pub fn segment(
    stroke: &Stroke,
    algorithm: Algorithm,
    params: &SegmenterParams,
) -> Result<Segmentation> {
    params.validate()?;
    Ok(run(stroke, algorithm, params).segmentation)
}

fn run(stroke: &Stroke, algorithm: Algorithm, params: &SegmenterParams) -> SegmentationReport {
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();

    let clean_start = Instant::now();
    let cleaned = stroke.cleaned();
    let points = cleaned.points.as_slice();
    let lengths = path_lengths(points);
    let path_length = lengths.last().copied().unwrap_or(0.0);
    timings.push_since("clean", clean_start);

    let input = InputDescriptor {
        points: stroke.len(),
        cleaned_points: cleaned.len(),
        path_length,
        bounding_diagonal: series::bounding_diagonal(points),
    };
    debug!(
        "segment: {} samples ({} after cleaning), path {:.1} px, algorithm {}",
        input.points,
        input.cleaned_points,
        path_length,
        algorithm.name()
    );

    let mut trace = PipelineTrace {
        input,
        algorithm,
        timings: TimingBreakdown::default(),
        short_stroke: false,
        detectors: Vec::new(),
        consensus: None,
        refinement: None,
        cleaned_corners: Vec::new(),
    };

    if cleaned.len() < params.short_stroke_points
        || cleaned.len() < 2
        || path_length < params.short_stroke_length
    {
        debug!("segment: short stroke, returning a single segment");
        let segmentation = Segmentation::from_corners(
            stroke.points(),
            &[0, stroke.last_index()],
            algorithm,
            SHORT_STROKE_CONFIDENCE,
        );
        trace.short_stroke = true;
        trace.cleaned_corners = vec![0, cleaned.len().saturating_sub(1)];
        timings.total_ms = elapsed_ms(total_start);
        trace.timings = timings;
        return SegmentationReport {
            segmentation,
            trace,
        };
    }

    let detect_start = Instant::now();
    let detected = run_detectors(
        points,
        algorithm.detectors(),
        &params.detectors,
        params.parallel_detectors,
    );
    timings.push_since("detectors", detect_start);
    trace.detectors = detected
        .iter()
        .map(|(c, ms)| DetectorStage::new(c, *ms))
        .collect();
    let candidates: Vec<Candidates> = detected.into_iter().map(|(c, _)| c).collect();

    let evaluator = FitEvaluator::new(&params.fit, params.detectors.line_test);
    let (corners, confidence) = match algorithm {
        Algorithm::Consensus | Algorithm::Refined => {
            let consensus_start = Instant::now();
            let consensus = combine(&candidates, points.len(), &params.consensus);
            let consensus_ms = elapsed_ms(consensus_start);
            timings.push("consensus", consensus_ms);
            trace.consensus = Some(ConsensusStage::new(&consensus, consensus_ms));

            if algorithm == Algorithm::Consensus {
                (consensus.corners, consensus.confidence)
            } else {
                let refine_start = Instant::now();
                let outcome = Refiner::new(&params.refine, params.detectors.line_test, &evaluator)
                    .refine(points, &consensus.corners);
                let refine_ms = elapsed_ms(refine_start);
                timings.push("refine", refine_ms);
                let mut confidence = error_confidence(outcome.total_error, points.len());
                if !outcome.converged {
                    confidence *= params.refine.non_convergence_penalty;
                }
                let corners = outcome.corners.clone();
                trace.refinement = Some(RefinementStage {
                    outcome,
                    elapsed_ms: refine_ms,
                });
                (corners, confidence)
            }
        }
        _ => {
            let corners = candidates
                .into_iter()
                .next()
                .map(|c| c.indices)
                .unwrap_or_else(|| vec![0, points.len() - 1]);
            let total = total_error(&evaluator, points, &lengths, &corners);
            let confidence = error_confidence(total, points.len());
            (corners, confidence)
        }
    };

    let mapped = cleaned.map_corners(&corners, stroke.len());
    debug!(
        "segment: {} corners {:?}, confidence {:.3}",
        mapped.len(),
        mapped,
        confidence
    );
    let segmentation = Segmentation::from_corners(stroke.points(), &mapped, algorithm, confidence);
    trace.cleaned_corners = corners;
    timings.total_ms = elapsed_ms(total_start);
    trace.timings = timings;
    SegmentationReport {
        segmentation,
        trace,
    }
}

fn run_detectors(
    points: &[StrokePoint],
    detectors: &[Detector],
    params: &DetectorParams,
    parallel: bool,
) -> Vec<(Candidates, f64)> {
    let timed = |detector: &Detector| {
        let start = Instant::now();
        let candidates = detector.detect(points, params);
        (candidates, elapsed_ms(start))
    };
    #[cfg(feature = "parallel")]
    {
        if parallel && detectors.len() > 1 {
            return detectors.par_iter().map(timed).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    detectors.iter().map(timed).collect()
}

fn total_error<C: SegmentCost>(
    cost: &C,
    points: &[StrokePoint],
    lengths: &[f64],
    corners: &[usize],
) -> f64 {
    corners
        .windows(2)
        .map(|w| cost.segment_error(points, lengths, w[0], w[1]))
        .sum()
}

/// Maps a summed fit error onto (0, 1]; degenerate fits score 0.
fn error_confidence(total_error: f64, points: usize) -> f64 {
    if !total_error.is_finite() {
        return 0.0;
    }
    1.0 / (1.0 + total_error / points.max(1) as f64)
}
