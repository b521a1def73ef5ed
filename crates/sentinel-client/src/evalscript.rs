//! Evalscript generation for the Process API.
//!
//! Two fixed variants: a true-color band passthrough, and an NDVI
//! bucketing script whose branches are generated from the download
//! classification scheme — the provider-side classes can never drift from
//! the scheme definition.

use std::fmt;

use imagery_common::scheme::ndvi_download_scheme;
use imagery_common::{Color, FetchError, FetchResult};

/// Rendering variants the tool can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    /// True-color RGB from the visible bands.
    Visual,
    /// Vegetation index bucketed into discrete color classes.
    Ndvi,
}

impl ImageType {
    pub fn parse(s: &str) -> FetchResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "ndvi" => Ok(Self::Ndvi),
            other => Err(FetchError::InvalidParameter {
                param: "image_type".to_string(),
                message: format!("'{}' is not supported; use 'visual' or 'ndvi'", other),
            }),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageType::Visual => write!(f, "visual"),
            ImageType::Ndvi => write!(f, "ndvi"),
        }
    }
}

const VISUAL_EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
    return {
        input: ["B04", "B03", "B02"],
        output: { bands: 3 }
    };
}

function evaluatePixel(sample) {
    return [sample.B04, sample.B03, sample.B02];
}
"#;

/// Produce the evalscript for the requested rendering.
pub fn generate_evalscript(image_type: ImageType) -> String {
    match image_type {
        ImageType::Visual => VISUAL_EVALSCRIPT.to_string(),
        ImageType::Ndvi => ndvi_evalscript(),
    }
}

/// Build the NDVI bucketing script from the download scheme.
fn ndvi_evalscript() -> String {
    let scheme = ndvi_download_scheme();
    let bands = scheme.bands();

    let mut script = String::from(
        r#"//VERSION=3
function setup() {
    return {
        input: ["B08", "B04"],
        output: { bands: 3 }
    };
}

function evaluatePixel(sample) {
    let ndvi = (sample.B08 - sample.B04) / (sample.B08 + sample.B04);
"#,
    );

    for (i, band) in bands.iter().enumerate() {
        let color = js_color(band.color);
        let branch = if i == 0 {
            format!("    if (ndvi < {}) return {};\n", band.upper, color)
        } else if i < bands.len() - 1 {
            format!("    else if (ndvi < {}) return {};\n", band.upper, color)
        } else {
            format!("    else return {};\n", color)
        };
        script.push_str(&branch);
    }

    script.push_str("}\n");
    script
}

/// Format a color as a JS `[r, g, b]` array with channels in [0, 1].
fn js_color(color: Color) -> String {
    format!(
        "[{:.3}, {:.3}, {:.3}]",
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0
    )
}
