use crate::consensus::Consensus;
use crate::corners::{Candidates, Detector};
use crate::refine::RefineOutcome;
use serde::Serialize;

/// Output of one detector, in cleaned-stroke indices.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorStage {
    pub detector: Detector,
    pub corners: Vec<usize>,
    pub elapsed_ms: f64,
}

impl DetectorStage {
    pub fn new(candidates: &Candidates, elapsed_ms: f64) -> Self {
        Self {
            detector: candidates.detector,
            corners: candidates.indices.clone(),
            elapsed_ms,
        }
    }
}

/// Result of the kernel density consensus.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusStage {
    pub corners: Vec<usize>,
    pub confidence: f64,
    pub peaks: usize,
    pub elapsed_ms: f64,
}

impl ConsensusStage {
    pub fn new(consensus: &Consensus, elapsed_ms: f64) -> Self {
        Self {
            corners: consensus.corners.clone(),
            confidence: consensus.confidence,
            peaks: consensus.peaks,
            elapsed_ms,
        }
    }
}

/// Result of merge refinement.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementStage {
    #[serde(flatten)]
    pub outcome: RefineOutcome,
    pub elapsed_ms: f64,
}
