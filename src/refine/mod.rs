//! Iterative merge refinement of a corner list.
//!
//! Starting from candidate corners, short segments are repeatedly merged
//! into the neighbour that yields the cheaper combined fit. The length
//! threshold that makes a segment "short" grows every iteration, so the
//! refiner first cleans up slivers and only later questions long segments.
//! Merges are only taken when the combined range fits about as well as the
//! two parts did, which keeps genuine corners in place.

mod options;

pub use options::RefineParams;

use crate::fit::SegmentCost;
use crate::stroke::{path_lengths, LineTest, StrokePoint};
use log::{debug, warn};
use serde::Serialize;

/// Result of a refinement run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineOutcome {
    pub corners: Vec<usize>,
    pub converged: bool,
    pub iterations: usize,
    pub initial_error: f64,
    pub total_error: f64,
    pub merges: usize,
}

/// Merge refiner over any [`SegmentCost`].
pub struct Refiner<'a, C: SegmentCost> {
    params: &'a RefineParams,
    line_test: LineTest,
    cost: &'a C,
}

enum Merge {
    Left,
    Right,
}

impl<'a, C: SegmentCost> Refiner<'a, C> {
    pub fn new(params: &'a RefineParams, line_test: LineTest, cost: &'a C) -> Self {
        Self {
            params,
            line_test,
            cost,
        }
    }

    /// Refine `corners` (indices into `points`). The output always holds both
    /// endpoints.
    pub fn refine(&self, points: &[StrokePoint], corners: &[usize]) -> RefineOutcome {
        let lengths = path_lengths(points);
        let last = points.len().saturating_sub(1);
        let total_length = lengths.last().copied().unwrap_or(0.0);

        let mut corners: Vec<usize> = corners.iter().copied().filter(|&c| c <= last).collect();
        corners.push(0);
        corners.push(last);
        corners.sort_unstable();
        corners.dedup();
        self.collinear_pass(points, &lengths, &mut corners);

        let mut errors = self.segment_errors(points, &lengths, &corners);
        let initial_error: f64 = errors.iter().sum();
        let mut total_error = initial_error;
        let mut iterations = 0;
        let mut merges = 0;
        let mut converged = false;

        while iterations < self.params.max_iterations {
            let segments = corners.len() - 1;
            if segments <= 1 || total_length <= 0.0 {
                converged = true;
                break;
            }
            iterations += 1;
            let threshold = self.params.ratio_step * iterations as f64;

            let ratios: Vec<f64> = corners
                .windows(2)
                .map(|w| (lengths[w[1]] - lengths[w[0]]) / total_length)
                .collect();
            let mut order: Vec<usize> = (0..segments).collect();
            order.sort_by(|&a, &b| ratios[a].total_cmp(&ratios[b]));

            let mut locked = vec![false; segments];
            let mut removals = Vec::new();
            let mut short_segments = 0;
            for k in order {
                if ratios[k] >= threshold {
                    continue;
                }
                short_segments += 1;
                if locked[k] {
                    continue;
                }
                match self.best_merge(points, &lengths, &corners, &errors, &locked, k) {
                    Some(Merge::Left) => {
                        removals.push(k);
                        locked[k - 1] = true;
                        locked[k] = true;
                    }
                    Some(Merge::Right) => {
                        removals.push(k + 1);
                        locked[k] = true;
                        locked[k + 1] = true;
                    }
                    None => {}
                }
            }

            if removals.is_empty() {
                if short_segments == segments {
                    converged = true;
                    break;
                }
                continue;
            }

            let snapshot = corners.clone();
            removals.sort_unstable_by(|a, b| b.cmp(a));
            removals.dedup();
            for &r in &removals {
                corners.remove(r);
            }
            self.collinear_pass(points, &lengths, &mut corners);
            let next_errors = self.segment_errors(points, &lengths, &corners);
            let next_total: f64 = next_errors.iter().sum();
            if next_total > self.params.error_growth * initial_error + 1e-9 {
                debug!(
                    "refine: iteration {iterations} reverted ({total_error:.3} -> {next_total:.3})"
                );
                corners = snapshot;
                converged = true;
                break;
            }
            merges += snapshot.len() - corners.len();
            errors = next_errors;
            total_error = next_total;
        }

        if !converged {
            warn!(
                "refine: no convergence after {} iterations ({} corners)",
                iterations,
                corners.len()
            );
        }
        debug!(
            "refine: {} corners, error {:.3} -> {:.3}, {} iterations",
            corners.len(),
            initial_error,
            total_error,
            iterations
        );
        RefineOutcome {
            corners,
            converged,
            iterations,
            initial_error,
            total_error,
            merges,
        }
    }

    /// Cheaper admissible merge of segment `k` with an unlocked neighbour.
    fn best_merge(
        &self,
        points: &[StrokePoint],
        lengths: &[f64],
        corners: &[usize],
        errors: &[f64],
        locked: &[bool],
        k: usize,
    ) -> Option<Merge> {
        let segments = errors.len();
        let left = (k > 0 && !locked[k - 1]).then(|| {
            let merged = self
                .cost
                .segment_error(points, lengths, corners[k - 1], corners[k + 1]);
            (merged, errors[k - 1] + errors[k])
        });
        let right = (k + 1 < segments && !locked[k + 1]).then(|| {
            let merged = self
                .cost
                .segment_error(points, lengths, corners[k], corners[k + 2]);
            (merged, errors[k] + errors[k + 1])
        });
        let slack = self.params.merge_slack;
        let (side, (merged, pair)) = match (left, right) {
            (Some(l), Some(r)) if r.0 < l.0 => (Merge::Right, r),
            (Some(l), _) => (Merge::Left, l),
            (None, Some(r)) => (Merge::Right, r),
            (None, None) => return None,
        };
        (merged < pair * slack).then_some(side)
    }

    /// Drop interior corners whose neighbours span a straight range, until
    /// none is left.
    fn collinear_pass(&self, points: &[StrokePoint], lengths: &[f64], corners: &mut Vec<usize>) {
        while let Some(k) = (1..corners.len().saturating_sub(1)).find(|&k| {
            self.line_test
                .passes(points, lengths, corners[k - 1], corners[k + 1])
        }) {
            corners.remove(k);
        }
    }

    fn segment_errors(
        &self,
        points: &[StrokePoint],
        lengths: &[f64],
        corners: &[usize],
    ) -> Vec<f64> {
        corners
            .windows(2)
            .map(|w| self.cost.segment_error(points, lengths, w[0], w[1]))
            .collect()
    }
}
