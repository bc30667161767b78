//! Stroke model and the point-series utilities every detector builds on.
//!
//! A [`Stroke`] is the caller-owned input: an ordered list of timestamped pen
//! samples. The engine never mutates it. Work happens on derived copies:
//!
//! - [`Stroke::cleaned`] drops repeated positions and samples whose timestamp
//!   does not advance, keeping a map back to the caller's indices.
//! - [`resample`] produces an arc-length-uniform copy that remembers where each
//!   resampled sample sits along the source polyline.
//!
//! The helpers in [`series`] (path lengths, the `is_line` predicate, windowing)
//! and [`filters`] operate on plain `&[StrokePoint]` slices so they apply to the
//! caller's stroke and to derived copies alike.

pub mod filters;
pub mod resample;
pub mod series;

pub use filters::SignalFilter;
pub use resample::{resample, resample_spacing, Resampled};
pub use series::{get_window, is_line, path_lengths, LineTest};

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};

/// Single pen sample. `t` is a timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    #[inline]
    pub fn distance(&self, other: &StrokePoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    #[inline]
    pub fn same_position(&self, other: &StrokePoint) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Linear interpolation of position and time.
    #[inline]
    pub fn lerp(&self, other: &StrokePoint, s: f64) -> StrokePoint {
        StrokePoint {
            x: self.x + s * (other.x - self.x),
            y: self.y + s * (other.y - self.y),
            t: self.t + s * (other.t - self.t),
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

/// Validated, immutable pen stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StrokePoint>", into = "Vec<StrokePoint>")]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    /// Build a stroke, rejecting fewer than two samples and non-finite values.
    pub fn new(points: Vec<StrokePoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(SegmentError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(SegmentError::NonFinitePoint { index });
        }
        Ok(Self { points })
    }

    /// Convenience constructor assigning timestamps `0, dt_ms, 2 * dt_ms, ...`.
    pub fn from_xy(xy: &[[f64; 2]], dt_ms: f64) -> Result<Self> {
        let points = xy
            .iter()
            .enumerate()
            .map(|(i, p)| StrokePoint::new(p[0], p[1], i as f64 * dt_ms))
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn path_lengths(&self) -> Vec<f64> {
        path_lengths(&self.points)
    }

    /// Total polyline length.
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    pub fn bounding_diagonal(&self) -> f64 {
        series::bounding_diagonal(&self.points)
    }

    /// The same samples in reverse drawing order. Timestamps are mirrored so
    /// they keep increasing.
    pub fn reversed(&self) -> Stroke {
        let first_t = self.points[0].t;
        let last_t = self.points[self.last_index()].t;
        let points = self
            .points
            .iter()
            .rev()
            .map(|p| StrokePoint::new(p.x, p.y, first_t + (last_t - p.t)))
            .collect();
        Stroke { points }
    }

    /// Drop samples that repeat the previous kept position or whose timestamp
    /// does not strictly increase.
    pub fn cleaned(&self) -> CleanedStroke {
        let mut points: Vec<StrokePoint> = Vec::with_capacity(self.points.len());
        let mut source = Vec::with_capacity(self.points.len());
        for (index, p) in self.points.iter().enumerate() {
            if let Some(last) = points.last() {
                if p.same_position(last) || p.t <= last.t {
                    continue;
                }
            }
            points.push(*p);
            source.push(index);
        }
        CleanedStroke { points, source }
    }
}

impl TryFrom<Vec<StrokePoint>> for Stroke {
    type Error = SegmentError;

    fn try_from(points: Vec<StrokePoint>) -> Result<Self> {
        Stroke::new(points)
    }
}

impl From<Stroke> for Vec<StrokePoint> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

/// Cleaned copy of a stroke with the caller index of every kept sample.
#[derive(Clone, Debug)]
pub struct CleanedStroke {
    pub points: Vec<StrokePoint>,
    source: Vec<usize>,
}

impl CleanedStroke {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Caller index of cleaned sample `i`.
    pub fn source_index(&self, i: usize) -> usize {
        self.source[i]
    }

    /// Map cleaned-stroke corners onto the caller's stroke. The first and last
    /// corners are pinned to the caller's endpoints so samples dropped during
    /// cleaning at either end still belong to a segment.
    pub fn map_corners(&self, corners: &[usize], source_len: usize) -> Vec<usize> {
        let last = source_len.saturating_sub(1);
        let cleaned_last = self.source.len().saturating_sub(1);
        let mut mapped: Vec<usize> = corners
            .iter()
            .filter(|&&c| c > 0 && c < cleaned_last)
            .map(|&c| self.source[c])
            .filter(|&c| c > 0 && c < last)
            .collect();
        mapped.push(0);
        mapped.push(last);
        mapped.sort_unstable();
        mapped.dedup();
        mapped
    }
}
