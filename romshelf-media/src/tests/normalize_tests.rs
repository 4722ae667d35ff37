use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};

use romshelf_core::{CoverSize, ShelfError};

use crate::normalize::{normalize_cover, placeholder_cover, scale_to_fit};

fn encoded(w: u32, h: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 255]));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn decoded(bytes: &[u8]) -> DynamicImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png).unwrap()
}

#[test]
fn test_scale_to_fit_portrait_cover() {
    // 600x800 into 264x352: both ratios are 0.44
    assert_eq!(scale_to_fit((600, 800), (264, 352)), (264, 352));
}

#[test]
fn test_scale_to_fit_landscape() {
    let (w, h) = scale_to_fit((1920, 1080), (90, 120));
    assert_eq!(w, 90);
    assert!(h <= 120);
    let ratio_orig = 1920.0 / 1080.0;
    let ratio_new = w as f64 / h as f64;
    assert!((ratio_orig - ratio_new).abs() < 0.05);
}

#[test]
fn test_scale_to_fit_no_upscale() {
    assert_eq!(scale_to_fit((40, 50), (264, 352)), (40, 50));
}

#[test]
fn test_scale_to_fit_exact_fit() {
    assert_eq!(scale_to_fit((90, 120), (90, 120)), (90, 120));
}

#[test]
fn test_scale_to_fit_extreme_ratio_keeps_a_pixel() {
    let (w, h) = scale_to_fit((10_000, 1), (90, 120));
    assert_eq!((w, h), (90, 1));
}

#[test]
fn test_scale_to_fit_zero() {
    assert_eq!(scale_to_fit((0, 0), (90, 120)), (0, 0));
    assert_eq!(scale_to_fit((10, 0), (90, 120)), (0, 0));
}

#[test]
fn test_normalize_shrinks_large_jpeg() {
    let bytes = encoded(600, 800, ImageFormat::Jpeg);
    for size in CoverSize::ALL {
        let png = normalize_cover(&bytes, size).unwrap();
        let (max_w, max_h) = size.max_dimensions();
        let img = decoded(&png);
        assert!(img.width() <= max_w && img.height() <= max_h, "{size}: {:?}", img.dimensions());
    }
}

#[test]
fn test_normalize_keeps_small_image_size() {
    let png = normalize_cover(&encoded(30, 40, ImageFormat::Png), CoverSize::Big).unwrap();
    assert_eq!(decoded(&png).dimensions(), (30, 40));
}

#[test]
fn test_normalize_output_is_png() {
    let png = normalize_cover(&encoded(300, 300, ImageFormat::Jpeg), CoverSize::Small).unwrap();
    assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
}

#[test]
fn test_normalize_rejects_garbage() {
    let err = normalize_cover(b"<html>404</html>", CoverSize::Small).unwrap_err();
    assert!(matches!(err, ShelfError::Fetch(_)), "got {err:?}");
}

#[test]
fn test_placeholder_fills_bounds() {
    for size in CoverSize::ALL {
        let img = decoded(&placeholder_cover(size).unwrap());
        assert_eq!(img.dimensions(), size.max_dimensions());
    }
}
