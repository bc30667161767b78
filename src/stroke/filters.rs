//! Windowed smoothing filters over per-sample signals (speed, curvature).

use super::series::{get_window, median};
use serde::{Deserialize, Serialize};

/// Smoothing applied to a per-sample signal. The payload is the window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalFilter {
    #[default]
    None,
    Median(usize),
    Mean(usize),
    Mode(usize),
}

impl SignalFilter {
    pub fn apply(&self, data: &[f64]) -> Vec<f64> {
        match *self {
            SignalFilter::None => data.to_vec(),
            SignalFilter::Median(w) => median_filter(data, w),
            SignalFilter::Mean(w) => mean_filter(data, w),
            SignalFilter::Mode(w) => mode_filter(data, w),
        }
    }

    pub fn window(&self) -> Option<usize> {
        match *self {
            SignalFilter::None => None,
            SignalFilter::Median(w) | SignalFilter::Mean(w) | SignalFilter::Mode(w) => Some(w),
        }
    }
}

fn windowed(data: &[f64], size: usize, reduce: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    if size <= 1 {
        return data.to_vec();
    }
    (0..data.len())
        .map(|i| reduce(&get_window(data, size, i)))
        .collect()
}

/// Even windows average the two middle values.
pub fn median_filter(data: &[f64], size: usize) -> Vec<f64> {
    windowed(data, size, median)
}

pub fn mean_filter(data: &[f64], size: usize) -> Vec<f64> {
    windowed(data, size, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Most frequent value in each window; ties go to the smaller value.
pub fn mode_filter(data: &[f64], size: usize) -> Vec<f64> {
    windowed(data, size, |w| {
        let mut sorted = w.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mut best = sorted[0];
        let mut best_count = 0;
        let mut k = 0;
        while k < sorted.len() {
            let mut j = k;
            while j < sorted.len() && sorted[j] == sorted[k] {
                j += 1;
            }
            if j - k > best_count {
                best_count = j - k;
                best = sorted[k];
            }
            k = j;
        }
        best
    })
}
