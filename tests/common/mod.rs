#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// White `width x height` image with a filled rectangle of `color`.
pub fn rect_on_white(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    color: Rgba<u8>,
) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, WHITE);
    for yy in y..y + h {
        for xx in x..x + w {
            img.put_pixel(xx, yy, color);
        }
    }
    img
}

pub fn encode(img: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    let dynamic = match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    dynamic.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

pub fn png(img: RgbaImage) -> Vec<u8> {
    encode(img, ImageFormat::Png)
}
