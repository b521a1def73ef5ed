//! Classification schemes mapping continuous index values to color bands.
//!
//! A scheme is an ordered sequence of contiguous intervals over a fixed
//! domain. Intervals are left-closed, right-open; the final interval also
//! includes the domain maximum. Samples outside the domain (including NaN
//! from a zero index denominator) classify to the scheme's fallback.
//!
//! Colors use a fixed 0-255 RGBA scale everywhere in this workspace.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Parse a `#rrggbb` hex color string (alpha 255).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::opaque(r, g, b))
    }

    /// Format as a `#rrggbb` hex string (alpha dropped).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One classification interval: `[lower, upper)` mapped to a label and color.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBand {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    pub color: Color,
}

impl ClassBand {
    fn new(lower: f64, upper: f64, label: &str, color: Color) -> Self {
        Self {
            lower,
            upper,
            label: label.to_string(),
            color,
        }
    }

    /// Midpoint of the interval, used for legend swatches.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// An ordered set of disjoint, contiguous class bands covering a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationScheme {
    domain: (f64, f64),
    bands: Vec<ClassBand>,
    fallback_label: String,
    fallback_color: Color,
}

impl ClassificationScheme {
    /// Build a scheme from `n + 1` boundaries and `n` (label, color) classes.
    ///
    /// Boundaries must be strictly increasing; the first and last boundary
    /// define the scheme domain.
    pub fn from_bounds(
        bounds: &[f64],
        classes: &[(&str, Color)],
        fallback_label: &str,
        fallback_color: Color,
    ) -> Result<Self, SchemeError> {
        if classes.is_empty() {
            return Err(SchemeError::Empty);
        }
        if bounds.len() != classes.len() + 1 {
            return Err(SchemeError::BoundaryCount {
                bounds: bounds.len(),
                classes: classes.len(),
            });
        }
        for pair in bounds.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SchemeError::NotIncreasing {
                    lower: pair[0],
                    upper: pair[1],
                });
            }
        }

        let bands = classes
            .iter()
            .enumerate()
            .map(|(i, (label, color))| ClassBand::new(bounds[i], bounds[i + 1], label, *color))
            .collect();

        Ok(Self {
            domain: (bounds[0], bounds[bounds.len() - 1]),
            bands,
            fallback_label: fallback_label.to_string(),
            fallback_color,
        })
    }

    /// The `[min, max]` domain covered by the bands.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn bands(&self) -> &[ClassBand] {
        &self.bands
    }

    /// The (color, label) pair returned for NaN or out-of-domain samples.
    pub fn fallback(&self) -> (Color, &str) {
        (self.fallback_color, &self.fallback_label)
    }

    /// Classify a single sample value.
    ///
    /// Intervals are `lower ≤ value < upper`; the last interval also
    /// includes the domain maximum. NaN and out-of-domain values map to
    /// the fallback, never to an error.
    pub fn classify(&self, value: f64) -> (Color, &str) {
        if !value.is_finite() || value < self.domain.0 || value > self.domain.1 {
            return self.fallback();
        }

        for band in &self.bands {
            if value < band.upper {
                return (band.color, &band.label);
            }
        }

        // value == domain maximum, which belongs to the final band
        let last = &self.bands[self.bands.len() - 1];
        (last.color, &last.label)
    }

    /// All (label, color) pairs in declaration order.
    ///
    /// Order is significant: adjacent classes are chosen for visual
    /// contrast, so the legend must never be re-sorted by value.
    pub fn legend(&self) -> Vec<(&str, Color)> {
        self.bands
            .iter()
            .map(|b| (b.label.as_str(), b.color))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("Classification scheme has no classes")]
    Empty,

    #[error("Expected {classes} + 1 boundaries, got {bounds}")]
    BoundaryCount { bounds: usize, classes: usize },

    #[error("Boundaries not strictly increasing at {lower} -> {upper}")]
    NotIncreasing { lower: f64, upper: f64 },
}

/// The 9-class NDVI scheme used for display legends.
pub fn ndvi_display_scheme() -> ClassificationScheme {
    ClassificationScheme {
        domain: (-1.0, 1.0),
        bands: vec![
            ClassBand::new(-1.0, -0.5, "NDVI < -0.5", Color::opaque(0x0c, 0x0c, 0x0c)),
            ClassBand::new(-0.5, 0.0, "-0.5 < NDVI ≤ 0", Color::opaque(0xea, 0xea, 0xea)),
            ClassBand::new(0.0, 0.1, "0 < NDVI ≤ 0.1", Color::opaque(0xcc, 0xc6, 0x82)),
            ClassBand::new(0.1, 0.2, "0.1 < NDVI ≤ 0.2", Color::opaque(0x91, 0xbf, 0x51)),
            ClassBand::new(0.2, 0.3, "0.2 < NDVI ≤ 0.3", Color::opaque(0x70, 0xa3, 0x3f)),
            ClassBand::new(0.3, 0.4, "0.3 < NDVI ≤ 0.4", Color::opaque(0x4f, 0x89, 0x2d)),
            ClassBand::new(0.4, 0.5, "0.4 < NDVI ≤ 0.5", Color::opaque(0x30, 0x6d, 0x1c)),
            ClassBand::new(0.5, 0.6, "0.5 < NDVI ≤ 0.6", Color::opaque(0x0f, 0x54, 0x0a)),
            ClassBand::new(0.6, 1.0, "0.6 < NDVI ≤ 1.0", Color::opaque(0x00, 0x44, 0x00)),
        ],
        fallback_label: "no data".to_string(),
        fallback_color: Color::TRANSPARENT,
    }
}

/// The 6-class NDVI scheme that drives the generated download evalscript.
pub fn ndvi_download_scheme() -> ClassificationScheme {
    ClassificationScheme {
        domain: (-1.0, 1.0),
        bands: vec![
            ClassBand::new(-1.0, -0.2, "NDVI < -0.2", Color::opaque(128, 128, 128)),
            ClassBand::new(-0.2, 0.0, "-0.2 ≤ NDVI < 0", Color::opaque(204, 102, 0)),
            ClassBand::new(0.0, 0.2, "0 ≤ NDVI < 0.2", Color::opaque(255, 255, 0)),
            ClassBand::new(0.2, 0.4, "0.2 ≤ NDVI < 0.4", Color::opaque(153, 204, 51)),
            ClassBand::new(0.4, 0.6, "0.4 ≤ NDVI < 0.6", Color::opaque(51, 204, 51)),
            ClassBand::new(0.6, 1.0, "NDVI ≥ 0.6", Color::opaque(0, 102, 0)),
        ],
        fallback_label: "no data".to_string(),
        fallback_color: Color::TRANSPARENT,
    }
}
