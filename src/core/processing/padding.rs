use tracing::debug;

use crate::core::geometry::Rectangle;
use crate::core::params::CanvasSpec;
use crate::error::StandardizeError;

/// Where and how large the detected object lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub safe_zone: Rectangle,
    /// Uniform scale applied to the bounding box
    pub scale: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    /// Pixel-aligned destination, always inside `safe_zone`
    pub dest: Rectangle,
}

pub fn safe_zone(canvas: &CanvasSpec) -> Result<Rectangle, StandardizeError> {
    let (w, h) = canvas.safe_zone_size()?;
    Ok(Rectangle::new(canvas.padding.left, canvas.padding.top, w, h))
}

/// Rounds to nearest, ties away from zero.
fn round_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}

/// Fits a `box_width x box_height` object into the canvas safe zone and centers it.
///
/// The scale is the smaller of the two axis ratios, so the object keeps its
/// aspect ratio and may fall short of the safe zone on one axis.
pub fn compute_placement(
    box_width: u32,
    box_height: u32,
    canvas: &CanvasSpec,
) -> Result<Placement, StandardizeError> {
    let zone = safe_zone(canvas)?;
    if box_width == 0 || box_height == 0 {
        return Err(StandardizeError::DegenerateBoundingBox {
            width: box_width,
            height: box_height,
        });
    }

    let zone_w = zone.width as f64;
    let zone_h = zone.height as f64;
    let scale = (zone_w / box_width as f64).min(zone_h / box_height as f64);
    let scaled_width = box_width as f64 * scale;
    let scaled_height = box_height as f64 * scale;

    let dest_w = round_px(scaled_width).clamp(1, zone.width);
    let dest_h = round_px(scaled_height).clamp(1, zone.height);
    let dest_x = round_px(zone.x as f64 + (zone_w - scaled_width) / 2.0)
        .min(zone.x + zone.width - dest_w);
    let dest_y = round_px(zone.y as f64 + (zone_h - scaled_height) / 2.0)
        .min(zone.y + zone.height - dest_h);

    let placement = Placement {
        safe_zone: zone,
        scale,
        scaled_width,
        scaled_height,
        dest: Rectangle::new(dest_x, dest_y, dest_w, dest_h),
    };
    debug!(
        "Placement: box={}x{}, safe_zone={}, scale={:.4}, dest={}",
        box_width, box_height, zone, scale, placement.dest
    );
    Ok(placement)
}
