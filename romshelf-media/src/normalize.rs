//! Image normalization for cached covers.
//!
//! Every stored cover is a PNG no larger than its variant's bounds.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use romshelf_core::{CoverSize, Result, ShelfError};

const PLACEHOLDER_FILL: Rgba<u8> = Rgba([0x3c, 0x3f, 0x44, 0xff]);
const PLACEHOLDER_EDGE: Rgba<u8> = Rgba([0x6b, 0x70, 0x78, 0xff]);
const PLACEHOLDER_EDGE_WIDTH: u32 = 2;

/// Largest size with the source aspect ratio that fits inside `bounds`.
/// Never upscales.
pub fn scale_to_fit(src: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let ((w, h), (max_w, max_h)) = (src, bounds);
    if w == 0 || h == 0 {
        return (0, 0);
    }
    if w <= max_w && h <= max_h {
        return src;
    }
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let fit = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (fit(w).min(max_w), fit(h).min(max_h))
}

/// Decode `bytes`, shrink to the bounds of `size` if needed, and re-encode as PNG.
pub fn normalize_cover(bytes: &[u8], size: CoverSize) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ShelfError::fetch(format!("not a usable image: {e}")))?
        .into_rgba8();

    let (w, h) = scale_to_fit(img.dimensions(), size.max_dimensions());
    if w == 0 || h == 0 {
        return Err(ShelfError::fetch("image has no pixels"));
    }
    let img = if (w, h) == img.dimensions() {
        img
    } else {
        imageops::resize(&img, w, h, FilterType::Lanczos3)
    };
    encode_png(img)
}

/// Neutral framed PNG at the full bounds of `size`, used as the default cover.
pub fn placeholder_cover(size: CoverSize) -> Result<Vec<u8>> {
    let (w, h) = size.max_dimensions();
    let img = RgbaImage::from_fn(w, h, |x, y| {
        let edge = x < PLACEHOLDER_EDGE_WIDTH
            || y < PLACEHOLDER_EDGE_WIDTH
            || x >= w - PLACEHOLDER_EDGE_WIDTH
            || y >= h - PLACEHOLDER_EDGE_WIDTH;
        if edge { PLACEHOLDER_EDGE } else { PLACEHOLDER_FILL }
    });
    encode_png(img)
}

fn encode_png(img: RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ShelfError::fetch(format!("PNG encoding failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
