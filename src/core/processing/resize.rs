use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use tracing::trace;

use crate::core::geometry::{PixelGrid, Rectangle};
use crate::error::StandardizeError;
use crate::types::ResampleFilter;

fn resize_alg(filter: ResampleFilter) -> ResizeAlg {
    match filter {
        ResampleFilter::Nearest => ResizeAlg::Nearest,
        ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// Copies `region` out of `source` row by row.
fn crop_rows(source: &PixelGrid, region: Rectangle) -> Vec<u8> {
    let stride = source.width() as usize * 4;
    let row_len = region.width as usize * 4;
    let mut out = Vec::with_capacity(row_len * region.height as usize);
    for row in region.y..region.y + region.height {
        let start = row as usize * stride + region.x as usize * 4;
        out.extend_from_slice(&source.as_raw()[start..start + row_len]);
    }
    out
}

/// Resamples the `region` of `source` to `target_width x target_height` RGBA.
///
/// `region` must lie inside `source`.
pub fn resample_region(
    source: &PixelGrid,
    region: Rectangle,
    target_width: u32,
    target_height: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, StandardizeError> {
    // Same size: plain crop, no filtering
    if region.width == target_width && region.height == target_height {
        trace!("Region already at target size {}x{}", target_width, target_height);
        return Ok(crop_rows(source, region));
    }

    let src_image = ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| StandardizeError::Resample(e.to_string()))?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(resize_alg(filter)).crop(
        region.x as f64,
        region.y as f64,
        region.width as f64,
        region.height as f64,
    );
    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| StandardizeError::Resample(e.to_string()))?;

    Ok(dst_image.into_vec())
}
