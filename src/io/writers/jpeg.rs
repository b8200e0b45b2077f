use jpeg_encoder::{ColorType, Encoder};

use crate::core::geometry::PixelGrid;
use crate::error::StandardizeError;

/// Quality of the canonical encoded form.
pub const CANONICAL_JPEG_QUALITY: u8 = 95;

/// Encodes an opaque RGBA grid into the canonical JPEG form (alpha is dropped).
pub fn encode_canonical_jpeg(grid: &PixelGrid) -> Result<Vec<u8>, StandardizeError> {
    let width = u16::try_from(grid.width()).map_err(|_| {
        StandardizeError::EncodeFailed(format!("width {} exceeds JPEG limit", grid.width()))
    })?;
    let height = u16::try_from(grid.height()).map_err(|_| {
        StandardizeError::EncodeFailed(format!("height {} exceeds JPEG limit", grid.height()))
    })?;

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, CANONICAL_JPEG_QUALITY);
    encoder
        .encode(grid.as_raw(), width, height, ColorType::Rgba)
        .map_err(|e| StandardizeError::EncodeFailed(e.to_string()))?;
    Ok(out)
}
