use tracing::debug;

use crate::core::geometry::{PixelGrid, Rectangle, WHITE};
use crate::core::params::CanvasSpec;
use crate::core::processing::padding::{Placement, compute_placement};
use crate::core::processing::resize::resample_region;
use crate::error::StandardizeError;
use crate::types::ResampleFilter;

/// Alpha-blends one channel over white.
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Draws an RGBA `tile` of `dest` size onto `canvas`, blending against the white fill.
fn draw_over_white(canvas: &mut PixelGrid, tile: &[u8], dest: Rectangle) {
    let row_len = dest.width as usize * 4;
    let x0 = dest.x as usize * 4;
    for (row, src_row) in tile.chunks_exact(row_len).enumerate() {
        let dst_row = &mut canvas.row_mut(dest.y + row as u32)[x0..x0 + row_len];
        for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let a = src[3];
            dst[0] = over_white(src[0], a);
            dst[1] = over_white(src[1], a);
            dst[2] = over_white(src[2], a);
            dst[3] = 255;
        }
    }
}

/// Scales the `bbox` region of `source` into the canvas safe zone, centered on opaque white.
///
/// The result is always exactly `canvas.width x canvas.height`.
pub fn composite(
    source: &PixelGrid,
    bbox: Rectangle,
    canvas: &CanvasSpec,
    filter: ResampleFilter,
) -> Result<PixelGrid, StandardizeError> {
    composite_with_placement(source, bbox, canvas, filter).map(|(grid, _)| grid)
}

/// Like [`composite`], also returning the computed placement.
pub fn composite_with_placement(
    source: &PixelGrid,
    bbox: Rectangle,
    canvas: &CanvasSpec,
    filter: ResampleFilter,
) -> Result<(PixelGrid, Placement), StandardizeError> {
    canvas.validate()?;
    let region = bbox.clamp_to(source.width(), source.height());
    if region.is_empty() {
        return Err(StandardizeError::DegenerateBoundingBox {
            width: region.width,
            height: region.height,
        });
    }

    let placement = compute_placement(region.width, region.height, canvas)?;
    let dest = placement.dest;
    let tile = resample_region(source, region, dest.width, dest.height, filter)?;

    let mut out = PixelGrid::filled(canvas.width, canvas.height, WHITE);
    draw_over_white(&mut out, &tile, dest);
    debug!(
        "Composited {} from {}x{} source onto {}x{} canvas at {}",
        region,
        source.width(),
        source.height(),
        canvas.width,
        canvas.height,
        dest
    );

    Ok((out, placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::PaddingSpec;
    use crate::core::processing::bbox::detect;

    fn square_on_white(size: u32, x: u32, y: u32, side: u32, rgba: [u8; 4]) -> PixelGrid {
        let mut grid = PixelGrid::filled(size, size, WHITE);
        for yy in y..y + side {
            for xx in x..x + side {
                grid.put_pixel(xx, yy, rgba);
            }
        }
        grid
    }

    #[test]
    fn output_matches_canvas_size() {
        let source = square_on_white(40, 5, 10, 12, [0, 0, 0, 255]);
        let canvas = CanvasSpec::new(90, 60, PaddingSpec::uniform(5));
        let out = composite(&source, detect(&source), &canvas, ResampleFilter::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (90, 60));
    }

    #[test]
    fn object_fills_safe_zone_and_margins_stay_white() {
        let source = square_on_white(50, 10, 10, 30, [0, 0, 0, 255]);
        let canvas = CanvasSpec::new(200, 200, PaddingSpec::uniform(20));
        let (out, placement) = composite_with_placement(
            &source,
            detect(&source),
            &canvas,
            ResampleFilter::Nearest,
        )
        .unwrap();
        assert_eq!(placement.dest, Rectangle::new(20, 20, 160, 160));
        assert_eq!(out.pixel(100, 100), [0, 0, 0, 255]);
        assert_eq!(out.pixel(10, 100), WHITE);
        assert_eq!(out.pixel(100, 190), WHITE);
        assert_eq!(out.pixel(0, 0), WHITE);
    }

    #[test]
    fn transparent_source_pixels_become_white() {
        let mut source = PixelGrid::filled(4, 4, [0, 0, 0, 0]);
        source.put_pixel(0, 0, [0, 0, 0, 255]);
        let canvas = CanvasSpec::new(8, 8, PaddingSpec::uniform(2));
        // Full frame scaled 4 -> 4 (no filtering), transparent pixels blended over white.
        let out = composite(&source, source.full_rect(), &canvas, ResampleFilter::Nearest).unwrap();
        assert_eq!(out.pixel(2, 2), [0, 0, 0, 255]);
        assert_eq!(out.pixel(5, 5), WHITE);
    }

    #[test]
    fn box_outside_source_is_degenerate() {
        let source = PixelGrid::filled(10, 10, WHITE);
        let canvas = CanvasSpec::new(100, 100, PaddingSpec::uniform(10));
        let err = composite(
            &source,
            Rectangle::new(10, 0, 5, 5),
            &canvas,
            ResampleFilter::Bilinear,
        )
        .unwrap_err();
        assert!(matches!(err, StandardizeError::DegenerateBoundingBox { .. }));
    }

    #[test]
    fn zero_width_box_is_degenerate() {
        let source = PixelGrid::filled(10, 10, WHITE);
        let err = composite(
            &source,
            Rectangle::new(2, 2, 0, 4),
            &CanvasSpec::default(),
            ResampleFilter::Bilinear,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StandardizeError::DegenerateBoundingBox {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn infeasible_padding_fails_before_work() {
        let source = PixelGrid::filled(10, 10, [0, 0, 0, 255]);
        let canvas = CanvasSpec::new(100, 100, PaddingSpec::uniform(50));
        let err = composite(&source, source.full_rect(), &canvas, ResampleFilter::Bilinear)
            .unwrap_err();
        assert_eq!(err.kind(), "infeasible_padding");
    }

    #[test]
    fn oversized_canvas_fails_before_allocating() {
        let source = PixelGrid::filled(10, 10, [0, 0, 0, 255]);
        let canvas = CanvasSpec::new(70_000, 70_000, PaddingSpec::uniform(150));
        let err = composite(&source, source.full_rect(), &canvas, ResampleFilter::Bilinear)
            .unwrap_err();
        assert_eq!(err.kind(), "canvas_too_large");
    }

    #[test]
    fn over_white_blend() {
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(100, 128), 177);
    }
}
