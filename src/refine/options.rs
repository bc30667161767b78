use serde::{Deserialize, Serialize};

/// Parameters of the merge-driven segmentation refiner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    /// Growth of the short-segment threshold per iteration, as a fraction of
    /// the stroke's path length.
    pub ratio_step: f64,
    /// A merge is accepted when its error stays below the pair's error times
    /// this factor.
    pub merge_slack: f64,
    /// An iteration whose total error exceeds this multiple of the initial
    /// total is reverted and refinement stops.
    pub error_growth: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Confidence multiplier applied when the cap is hit.
    pub non_convergence_penalty: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            ratio_step: 0.05,
            merge_slack: 1.1,
            error_growth: 3.0,
            max_iterations: 50,
            non_convergence_penalty: 0.5,
        }
    }
}
