//! Coordinate Reference System types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes accepted by the imagery provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS string.
    ///
    /// Accepts formats like "EPSG:4326", "epsg:4326", or "CRS:84".
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        match s.to_uppercase().as_str() {
            "EPSG:4326" | "CRS:84" => Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" => Ok(CrsCode::Epsg3857),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Check if this is a geographic (lat/lon degrees) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326)
    }

    /// The OGC URL form used in Process API request bodies.
    pub fn as_url(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 => "http://www.opengis.net/def/crs/EPSG/0/4326",
            CrsCode::Epsg3857 => "http://www.opengis.net/def/crs/EPSG/0/3857",
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(CrsCode::parse("EPSG:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("crs:84").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("EPSG:3857").unwrap(), CrsCode::Epsg3857);
        assert!(CrsCode::parse("EPSG:99999").is_err());
    }

    #[test]
    fn test_crs_url() {
        assert_eq!(
            CrsCode::Epsg4326.as_url(),
            "http://www.opengis.net/def/crs/EPSG/0/4326"
        );
    }

    #[test]
    fn test_is_geographic() {
        assert!(CrsCode::Epsg4326.is_geographic());
        assert!(!CrsCode::Epsg3857.is_geographic());
    }
}
