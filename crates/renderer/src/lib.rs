//! Raster rendering for index visualization.
//!
//! Implements:
//! - Discrete color-band rendering of single-band rasters
//! - Legend strip rendering
//! - PNG encode/decode

pub mod png;
pub mod render;

pub use png::{decode_image, encode_png};
pub use render::{render_classified, render_legend_strip};
