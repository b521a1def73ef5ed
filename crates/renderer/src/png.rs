//! PNG encode/decode for RGBA pixel buffers.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use imagery_common::{FetchError, FetchResult};
use tracing::debug;

/// Encode an RGBA pixel buffer (4 bytes per pixel) as PNG bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> FetchResult<Vec<u8>> {
    let img = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or_else(|| {
        FetchError::Render(format!(
            "pixel buffer does not match {}x{} RGBA dimensions",
            width, height
        ))
    })?;

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(|e| FetchError::Render(format!("PNG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

/// Decode image bytes into an RGBA buffer plus its dimensions.
pub fn decode_image(bytes: &[u8]) -> FetchResult<(Vec<u8>, u32, u32)> {
    let img = image::load_from_memory(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, "Decoded image");

    Ok((rgba.into_raw(), width, height))
}
