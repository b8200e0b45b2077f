use tracing::debug;

use crate::core::params::CanvasSpec;
use crate::core::processing::bbox::detect;
use crate::core::processing::composite::composite;
use crate::error::StandardizeError;
use crate::io::decode::decode_rgba;
use crate::io::writers::jpeg::encode_canonical_jpeg;
use crate::types::ResampleFilter;

/// Canonical output of standardizing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedImage {
    /// Canonical JPEG bytes
    pub encoded: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode, detect, composite, encode with the default resampling filter.
pub fn standardize(raw: &[u8], canvas: &CanvasSpec) -> Result<StandardizedImage, StandardizeError> {
    standardize_with_filter(raw, canvas, ResampleFilter::default())
}

/// Runs the full per-image chain, stopping at the first failure.
///
/// Output dimensions are always the canvas dimensions, never the object's own.
pub fn standardize_with_filter(
    raw: &[u8],
    canvas: &CanvasSpec,
    filter: ResampleFilter,
) -> Result<StandardizedImage, StandardizeError> {
    let source = decode_rgba(raw)?;
    let bbox = detect(&source);
    debug!(
        "Detected bounding box {} in {}x{} source",
        bbox,
        source.width(),
        source.height()
    );
    let grid = composite(&source, bbox, canvas, filter)?;
    let encoded = encode_canonical_jpeg(&grid)?;

    Ok(StandardizedImage {
        encoded,
        width: canvas.width,
        height: canvas.height,
    })
}
