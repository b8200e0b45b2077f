use tracing::trace;

use crate::core::geometry::{PixelGrid, Rectangle};

/// Pixels with alpha at or below this value are treated as transparent background.
pub const ALPHA_BACKGROUND_MAX: u8 = 20;

/// Pixels whose R, G and B are all at or above this value read as white backdrop.
pub const WHITE_THRESHOLD: u8 = 252;

pub fn is_background(rgba: [u8; 4]) -> bool {
    let [r, g, b, a] = rgba;
    a <= ALPHA_BACKGROUND_MAX
        || (r >= WHITE_THRESHOLD && g >= WHITE_THRESHOLD && b >= WHITE_THRESHOLD)
}

/// Smallest rectangle enclosing every foreground pixel of `source`.
///
/// Falls back to the full image when nothing but background is found, so the
/// compositor never receives an empty box for a non-empty image.
pub fn detect(source: &PixelGrid) -> Rectangle {
    let width = source.width();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    if width > 0 {
        for (i, px) in source.as_raw().chunks_exact(4).enumerate() {
            if is_background([px[0], px[1], px[2], px[3]]) {
                continue;
            }
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_x == u32::MAX {
        trace!("No foreground found, using full {}x{} frame", width, source.height());
        return source.full_rect();
    }

    Rectangle::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}
