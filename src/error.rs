use thiserror::Error;

/// Errors surfaced to callers of the segmentation engine.
///
/// Numeric trouble inside the fits never shows up here: degenerate fits are
/// scored with [`crate::fit::DEGENERATE_ERROR`] and refinement that runs out of
/// iterations reports a reduced confidence instead.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SegmentError {
    #[error("stroke needs at least 2 samples, got {count}")]
    TooFewPoints { count: usize },

    #[error("stroke sample {index} has a non-finite coordinate or timestamp")]
    NonFinitePoint { index: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl SegmentError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SegmentError>;
