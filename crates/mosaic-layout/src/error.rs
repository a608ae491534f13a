//! Errors raised while building or laying out gallery content.

use thiserror::Error;

/// Failure to construct an item, accept an option, or lay out a section.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An item's intrinsic aspect ratio was zero, negative or not finite.
    #[error("item {id:?} has invalid aspect ratio {aspect_ratio}")]
    InvalidAspectRatio { id: String, aspect_ratio: f32 },

    /// The row aspect-ratio threshold must be finite and positive.
    #[error("row aspect ratio threshold must be finite and positive, got {0}")]
    InvalidThreshold(f32),

    /// The inter-tile margin must be finite and non-negative.
    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),

    /// A section would have no positive height at the requested width.
    #[error("section {index} has no positive height at width {width}")]
    DegenerateSection { index: usize, width: f32 },
}
