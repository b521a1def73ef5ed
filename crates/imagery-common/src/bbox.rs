//! Bounding box types and operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approximate length of one degree of latitude/longitude at the equator.
pub const KM_PER_DEGREE: f64 = 111.32;

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Width of the bounding box in degrees.
    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees.
    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Approximate width in kilometers (1° ≈ 111.32 km).
    pub fn width_km(&self) -> f64 {
        self.width_deg() * KM_PER_DEGREE
    }

    /// Approximate height in kilometers (1° ≈ 111.32 km).
    pub fn height_km(&self) -> f64 {
        self.height_deg() * KM_PER_DEGREE
    }

    /// Convert to the STAC `[west, south, east, north]` array form.
    pub fn to_wsen(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}, {:.6}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
