//! Area-of-interest loading and validation.
//!
//! Reads GeoJSON polygon features, merges them into a single unified
//! geometry and bounds the result to the provider request limit
//! (100 km per side).
//!
//! Polygons crossing the antimeridian are not supported: coordinates are
//! taken as-is with no longitude wrap-around.

use std::path::Path;

use geo::{BooleanOps, BoundingRect, MultiPolygon, Polygon, Validation};
use geojson::GeoJson;
use imagery_common::{BoundingBox, CrsCode, FetchError, FetchResult};
use tracing::warn;

/// Maximum AOI extent accepted per side, in kilometers.
pub const MAX_EXTENT_KM: f64 = 100.0;

/// A validated area of interest: bounding box plus its CRS tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedAoi {
    pub bbox: BoundingBox,
    pub crs: CrsCode,
}

/// Read a GeoJSON AOI file and validate its geometry.
pub fn load_aoi(path: &Path) -> FetchResult<ValidatedAoi> {
    let content = std::fs::read_to_string(path)?;
    let polygons = parse_polygons(&content)?;
    validate(&polygons)
}

/// Extract polygon geometries from GeoJSON text.
///
/// MultiPolygons are flattened into their parts; non-areal geometries are
/// skipped with a warning.
pub fn parse_polygons(input: &str) -> FetchResult<Vec<Polygon<f64>>> {
    let gj: GeoJson = input
        .parse()
        .map_err(|e: geojson::Error| FetchError::Geometry(format!("failed to parse GeoJSON: {e}")))?;
    let collection = geojson::quick_collection(&gj)
        .map_err(|e| FetchError::Geometry(format!("unsupported GeoJSON content: {e}")))?;

    let mut polygons = Vec::new();
    for geometry in collection {
        match geometry {
            geo_types::Geometry::Polygon(p) => polygons.push(p),
            geo_types::Geometry::MultiPolygon(mp) => polygons.extend(mp.0),
            _ => warn!("Skipping non-polygon geometry in AOI file"),
        }
    }

    Ok(polygons)
}

/// Validate polygons and bound them to the maximum extent.
///
/// Merges the inputs into one unified geometry, rejects invalid or
/// oversized areas, and returns the bounding box tagged WGS84. Oversized
/// areas are reported with their measured dimensions; no attempt is made
/// to split or clip them.
pub fn validate(polygons: &[Polygon<f64>]) -> FetchResult<ValidatedAoi> {
    if polygons.is_empty() {
        return Err(FetchError::Geometry(
            "AOI contains no polygon features".to_string(),
        ));
    }

    for (i, polygon) in polygons.iter().enumerate() {
        if !polygon.is_valid() {
            return Err(FetchError::Geometry(format!(
                "polygon {} is invalid (self-intersecting or degenerate)",
                i
            )));
        }
    }

    let mut unified = MultiPolygon::new(vec![polygons[0].clone()]);
    for polygon in &polygons[1..] {
        unified = unified.union(&MultiPolygon::from(polygon.clone()));
    }
    if !unified.is_valid() {
        return Err(FetchError::Geometry(
            "unified AOI geometry is invalid".to_string(),
        ));
    }

    let rect = unified
        .bounding_rect()
        .ok_or_else(|| FetchError::Geometry("AOI geometry is empty".to_string()))?;
    let bbox = BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);

    let (width_km, height_km) = (bbox.width_km(), bbox.height_km());
    if width_km > MAX_EXTENT_KM || height_km > MAX_EXTENT_KM {
        return Err(FetchError::AreaTooLarge {
            width_km,
            height_km,
        });
    }

    Ok(ValidatedAoi {
        bbox,
        crs: CrsCode::Epsg4326,
    })
}
