//! Tests for classified rendering and legend strips.

use imagery_common::scheme::{ndvi_display_scheme, ndvi_download_scheme};
use imagery_common::Color;
use renderer::{decode_image, encode_png, render_classified, render_legend_strip};

fn pixel(pixels: &[u8], width: usize, x: usize, y: usize) -> Color {
    let offset = (y * width + x) * 4;
    Color::new(
        pixels[offset],
        pixels[offset + 1],
        pixels[offset + 2],
        pixels[offset + 3],
    )
}

// ============================================================================
// render_classified tests
// ============================================================================

#[test]
fn test_render_classifies_each_sample() {
    let scheme = ndvi_display_scheme();
    let data = vec![-0.75, 0.25, 0.55, 0.8];

    let pixels = render_classified(&data, 2, 2, &scheme);
    assert_eq!(pixels.len(), 16);

    assert_eq!(pixel(&pixels, 2, 0, 0), Color::from_hex("#0c0c0c").unwrap());
    assert_eq!(pixel(&pixels, 2, 1, 0), Color::from_hex("#70a33f").unwrap());
    assert_eq!(pixel(&pixels, 2, 0, 1), Color::from_hex("#0f540a").unwrap());
    assert_eq!(pixel(&pixels, 2, 1, 1), Color::from_hex("#004400").unwrap());
}

#[test]
fn test_render_maps_nan_to_fallback() {
    let scheme = ndvi_display_scheme();
    let data = vec![f32::NAN, 0.25, 0.25, 0.25];

    let pixels = render_classified(&data, 2, 2, &scheme);
    assert_eq!(pixel(&pixels, 2, 0, 0), scheme.fallback().0);
    assert_eq!(pixel(&pixels, 2, 1, 0), Color::from_hex("#70a33f").unwrap());
}

#[test]
fn test_render_treats_missing_samples_as_fallback() {
    let scheme = ndvi_display_scheme();
    // Only 2 samples for a 2x2 raster
    let data = vec![0.25, 0.25];

    let pixels = render_classified(&data, 2, 2, &scheme);
    assert_eq!(pixel(&pixels, 2, 0, 1), scheme.fallback().0);
    assert_eq!(pixel(&pixels, 2, 1, 1), scheme.fallback().0);
}

#[test]
fn test_render_empty_raster() {
    let scheme = ndvi_display_scheme();
    assert!(render_classified(&[], 0, 0, &scheme).is_empty());
}

#[test]
fn test_render_is_pure() {
    let scheme = ndvi_display_scheme();
    let data = vec![-0.3, 0.0, 0.15, 0.45, 0.65, f32::NAN];

    let first = render_classified(&data, 3, 2, &scheme);
    let second = render_classified(&data, 3, 2, &scheme);
    assert_eq!(first, second);
}

// ============================================================================
// render_legend_strip tests
// ============================================================================

#[test]
fn test_legend_strip_has_one_swatch_per_class_in_order() {
    let scheme = ndvi_display_scheme();
    let (pixels, width, height) = render_legend_strip(&scheme, 10, 4);

    assert_eq!(width, 9 * 10);
    assert_eq!(height, 4);
    assert_eq!(pixels.len(), width * height * 4);

    for (i, (_, color)) in scheme.legend().iter().enumerate() {
        // Sample the center of each swatch
        assert_eq!(pixel(&pixels, width, i * 10 + 5, 2), *color);
    }
}

#[test]
fn test_legend_strip_for_download_scheme() {
    let scheme = ndvi_download_scheme();
    let (pixels, width, _) = render_legend_strip(&scheme, 8, 2);

    assert_eq!(width, 6 * 8);
    // First swatch is the below-zero gray class
    assert_eq!(pixel(&pixels, width, 0, 0), Color::opaque(128, 128, 128));
    // Last swatch is the dense-vegetation class
    assert_eq!(pixel(&pixels, width, width - 1, 0), Color::opaque(0, 102, 0));
}

// ============================================================================
// PNG codec tests
// ============================================================================

#[test]
fn test_encode_png_then_decode_preserves_dimensions() {
    let scheme = ndvi_display_scheme();
    let (pixels, width, height) = render_legend_strip(&scheme, 4, 4);

    let png = encode_png(&pixels, width as u32, height as u32).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

    let (decoded, w, h) = decode_image(&png).unwrap();
    assert_eq!((w, h), (width as u32, height as u32));
    assert_eq!(decoded, pixels);
}

#[test]
fn test_encode_png_rejects_mismatched_buffer() {
    assert!(encode_png(&[0u8; 8], 100, 100).is_err());
}

#[test]
fn test_decode_rejects_non_image_bytes() {
    assert!(decode_image(b"definitely not a png").is_err());
}
