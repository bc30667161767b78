//! Public entry point: clean the stroke, run the detectors an algorithm
//! needs, reconcile and refine their corners, and split the caller's stroke.

mod params;
mod pipeline;

pub use params::{
    SegmenterParams, MAX_POINTS_PER_DIAGONAL, MIN_GRID_STEP, MIN_RESAMPLE_SPACING,
};
pub use pipeline::{segment, Segmenter, SHORT_STROKE_CONFIDENCE};
