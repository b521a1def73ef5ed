//! Discrete color-band rendering for single-band index rasters.

use imagery_common::ClassificationScheme;
use rayon::prelude::*;

/// Render a single-band raster through a classification scheme.
///
/// # Arguments
/// - `data`: raster samples in row-major order (`width * height` values)
/// - `width`: number of columns
/// - `height`: number of rows
/// - `scheme`: the classification scheme to apply element-wise
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel, 0-255 scale). Samples the scheme
/// cannot place (NaN, out-of-domain, missing) take the scheme's fallback
/// color.
pub fn render_classified(
    data: &[f32],
    width: usize,
    height: usize,
    scheme: &ClassificationScheme,
) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut pixels = vec![0u8; width * height * 4];

    pixels
        .par_chunks_exact_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let value = data
                    .get(y * width + x)
                    .copied()
                    .unwrap_or(f32::NAN);
                let (color, _) = scheme.classify(value as f64);

                let offset = x * 4;
                row[offset] = color.r;
                row[offset + 1] = color.g;
                row[offset + 2] = color.b;
                row[offset + 3] = color.a;
            }
        });

    pixels
}

/// Render a horizontal legend strip with one swatch per class, in scheme
/// declaration order.
///
/// Swatches are produced by classifying each interval's midpoint, so the
/// strip goes through the same classification path as full renders.
///
/// # Returns
/// The RGBA strip plus its (width, height) in pixels.
pub fn render_legend_strip(
    scheme: &ClassificationScheme,
    swatch_width: usize,
    swatch_height: usize,
) -> (Vec<u8>, usize, usize) {
    let bands = scheme.bands();
    let width = bands.len() * swatch_width;
    let height = swatch_height;

    let mut samples = Vec::with_capacity(width * height);
    for _ in 0..height {
        for band in bands {
            samples.extend(std::iter::repeat(band.midpoint() as f32).take(swatch_width));
        }
    }

    let pixels = render_classified(&samples, width, height, scheme);
    (pixels, width, height)
}
