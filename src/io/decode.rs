use tracing::trace;

use crate::core::geometry::PixelGrid;
use crate::error::StandardizeError;

/// Decodes any format the `image` crate recognises into an RGBA grid.
pub fn decode_rgba(bytes: &[u8]) -> Result<PixelGrid, StandardizeError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| StandardizeError::DecodeFailed(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    trace!("Decoded {}x{} image ({} bytes in)", width, height, bytes.len());
    PixelGrid::from_raw(width, height, rgba.into_raw()).ok_or_else(|| {
        StandardizeError::DecodeFailed(format!("decoder returned a short buffer for {width}x{height}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn garbage_is_decode_failed() {
        let err = decode_rgba(b"definitely not an image").unwrap_err();
        assert_eq!(err.kind(), "decode_failed");
    }

    #[test]
    fn png_decodes_to_rgba() {
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        let grid = decode_rgba(buf.get_ref()).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.pixel(2, 1), [10, 20, 30, 255]);
    }
}
