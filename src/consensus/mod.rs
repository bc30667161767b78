//! Density-based reconciliation of several detectors' candidate lists.
//!
//! All candidate indices are pooled and smoothed with a Gaussian kernel over
//! a fine grid of fractional indices. Peaks of the resulting density are the
//! combined corners: indices that several detectors agree on (within roughly
//! one bandwidth) reinforce each other, isolated outliers stay weak.

use crate::corners::Candidates;
use serde::{Deserialize, Serialize};

/// Kernel density consensus.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Gaussian kernel bandwidth in index units.
    pub bandwidth: f64,
    /// Grid resolution in index units.
    pub grid_step: f64,
    /// Grid padding on either side, as a fraction of the index range.
    pub grid_padding: f64,
    /// Peaks below this fraction of the highest density are ignored.
    /// 0 disables the floor.
    pub min_support: f64,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            bandwidth: 1.5,
            grid_step: 0.1,
            grid_padding: 0.1,
            min_support: 0.0,
        }
    }
}

/// Combined corners with the agreement score of the contributing detectors.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consensus {
    pub corners: Vec<usize>,
    /// Mean fraction of detectors voting near each combined corner.
    pub confidence: f64,
    /// Density peaks found before rounding and deduplication.
    pub peaks: usize,
}

/// Reconcile candidate lists for a stroke of `len` samples.
pub fn combine(candidates: &[Candidates], len: usize, params: &ConsensusParams) -> Consensus {
    let last = len.saturating_sub(1);
    let pooled: Vec<f64> = candidates
        .iter()
        .flat_map(|c| c.indices.iter().map(|&i| i as f64))
        .collect();
    if pooled.is_empty() || len == 0 {
        let mut corners = vec![0, last];
        corners.dedup();
        return Consensus {
            corners,
            confidence: 0.0,
            peaks: 0,
        };
    }

    let density = KernelDensity::new(&pooled, params);
    let values = density.evaluate();
    let floor = params.min_support * values.iter().fold(0.0_f64, |m, &v| m.max(v));

    let peak_positions: Vec<f64> = local_maxima(&values)
        .into_iter()
        .filter(|&(_, v)| v >= floor)
        .map(|(k, _)| density.position(k))
        .collect();

    let mut corners: Vec<usize> = peak_positions
        .iter()
        .map(|&x| x.round().clamp(0.0, last as f64) as usize)
        .collect();
    corners.push(0);
    corners.push(last);
    corners.sort_unstable();
    corners.dedup();

    let confidence = agreement(candidates, &corners, 2.0 * params.bandwidth);
    log::debug!(
        "consensus: {} pooled indices, {} peaks -> {:?}",
        pooled.len(),
        peak_positions.len(),
        corners
    );
    Consensus {
        corners,
        confidence,
        peaks: peak_positions.len(),
    }
}

struct KernelDensity<'a> {
    samples: &'a [f64],
    bandwidth: f64,
    lo: f64,
    step: f64,
    steps: usize,
}

impl<'a> KernelDensity<'a> {
    fn new(samples: &'a [f64], params: &ConsensusParams) -> Self {
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let pad = if range > 0.0 {
            params.grid_padding * range
        } else {
            1.0
        };
        let step = params.grid_step;
        let lo = min - pad;
        let steps = ((max + pad - lo) / step).round() as usize;
        Self {
            samples,
            bandwidth: params.bandwidth,
            lo,
            step,
            steps,
        }
    }

    fn at(&self, x: f64) -> f64 {
        self.samples
            .iter()
            .map(|&s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum()
    }

    /// Index position of (fractional) grid point `k`.
    fn position(&self, k: f64) -> f64 {
        self.lo + k * self.step
    }

    fn evaluate(&self) -> Vec<f64> {
        (0..=self.steps)
            .map(|k| self.at(self.position(k as f64)))
            .collect()
    }
}

/// Strict local maxima as (fractional grid index, value). A flat top reports
/// the centre of the plateau.
fn local_maxima(values: &[f64]) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut k = 1;
    while k + 1 < values.len() {
        if values[k] > values[k - 1] {
            let mut j = k;
            while j + 1 < values.len() && values[j + 1] == values[k] {
                j += 1;
            }
            if j + 1 < values.len() && values[j + 1] < values[k] {
                out.push(((k + j) as f64 / 2.0, values[k]));
            }
            k = j + 1;
        } else {
            k += 1;
        }
    }
    out
}

/// Mean over `corners` of the fraction of detectors with a candidate within
/// `radius` indices.
fn agreement(candidates: &[Candidates], corners: &[usize], radius: f64) -> f64 {
    if candidates.is_empty() || corners.is_empty() {
        return 0.0;
    }
    let total: f64 = corners
        .iter()
        .map(|&c| {
            let voters = candidates
                .iter()
                .filter(|cand| {
                    cand.indices
                        .iter()
                        .any(|&i| (i as f64 - c as f64).abs() <= radius)
                })
                .count();
            voters as f64 / candidates.len() as f64
        })
        .sum();
    total / corners.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners::Detector;

    fn cand(detector: Detector, indices: &[usize]) -> Candidates {
        Candidates {
            detector,
            indices: indices.to_vec(),
        }
    }

    #[test]
    fn unanimous_detectors_keep_their_corners() {
        let lists: Vec<Candidates> = Detector::ALL
            .iter()
            .map(|&d| cand(d, &[0, 9, 19]))
            .collect();
        let out = combine(&lists, 20, &ConsensusParams::default());
        assert_eq!(out.corners, vec![0, 9, 19]);
        assert!((out.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nearby_votes_fuse_into_one_corner() {
        let lists = vec![
            cand(Detector::ExtremalDistance, &[0, 20, 40]),
            cand(Detector::Straw, &[0, 21, 40]),
            cand(Detector::Monotonicity, &[0, 20, 40]),
            cand(Detector::SpeedCurvature, &[0, 19, 40]),
        ];
        let out = combine(&lists, 41, &ConsensusParams::default());
        assert_eq!(out.corners, vec![0, 20, 40]);
    }

    #[test]
    fn support_floor_drops_lone_votes() {
        let lists = vec![
            cand(Detector::ExtremalDistance, &[0, 20, 40]),
            cand(Detector::Straw, &[0, 20, 40]),
            cand(Detector::Monotonicity, &[0, 20, 30, 40]),
        ];
        let loose = combine(&lists, 41, &ConsensusParams::default());
        assert_eq!(loose.corners, vec![0, 20, 30, 40]);
        let strict = ConsensusParams {
            min_support: 0.5,
            ..Default::default()
        };
        let out = combine(&lists, 41, &strict);
        assert_eq!(out.corners, vec![0, 20, 40]);
        assert!(out.confidence > loose.confidence);
    }

    #[test]
    fn plateau_reports_centre() {
        let values = [0.0, 1.0, 2.0, 2.0, 2.0, 1.0];
        assert_eq!(local_maxima(&values), vec![(3.0, 2.0)]);
    }

    #[test]
    fn empty_input_returns_endpoints() {
        let out = combine(&[], 10, &ConsensusParams::default());
        assert_eq!(out.corners, vec![0, 9]);
        assert_eq!(out.confidence, 0.0);
    }
}
