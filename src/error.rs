//! Crate-level error type and `Result` alias for stable, structured error handling.
//! `StandardizeError` covers everything that can go wrong while standardizing a
//! single image; the batch orchestrator records it on the item instead of
//! propagating it. `Error` covers argument validation, I/O and export failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Axis of the canvas a padding pair applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Per-image failure of the standardization chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StandardizeError {
    #[error("Input could not be decoded as an image: {0}")]
    DecodeFailed(String),

    #[error("Padding leaves no safe zone on the {axis} axis: canvas={canvas}, padding={padding}")]
    InfeasiblePadding { axis: Axis, canvas: u32, padding: u32 },

    #[error("Canvas {width}x{height} exceeds the {max}px limit of the canonical encoding")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },

    #[error("Detected bounding box has zero area: {width}x{height}")]
    DegenerateBoundingBox { width: u32, height: u32 },

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("Output could not be encoded: {0}")]
    EncodeFailed(String),
}

impl StandardizeError {
    /// Stable short identifier recorded as the failure kind of a queue item.
    pub fn kind(&self) -> &'static str {
        match self {
            StandardizeError::DecodeFailed(_) => "decode_failed",
            StandardizeError::InfeasiblePadding { .. } => "infeasible_padding",
            StandardizeError::CanvasTooLarge { .. } => "canvas_too_large",
            StandardizeError::DegenerateBoundingBox { .. } => "degenerate_bounding_box",
            StandardizeError::Resample(_) => "resample_failed",
            StandardizeError::EncodeFailed(_) => "encode_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Standardization error: {0}")]
    Standardize(#[from] StandardizeError),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },
}
