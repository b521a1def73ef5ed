//! STAC catalog item search.
//!
//! The Sentinel Hub catalog speaks the STAC Item Search API; this module
//! models the subset the tool needs: bbox, datetime interval, collection,
//! cloud-cover filter and result limit. A single page bounded by the limit
//! is fetched — the tool only consumes the first usable scene.

use std::collections::HashMap;

use imagery_common::{BoundingBox, FetchError, FetchResult, TimeOfInterest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::SentinelClient;

/// Body for `POST /search` (STAC API – Item Search).
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    /// Bounding box `[west, south, east, north]`.
    pub bbox: [f64; 4],
    /// RFC 3339 interval, e.g. `"2024-06-01T00:00:00Z/2024-06-30T23:59:59Z"`.
    pub datetime: String,
    pub collections: Vec<String>,
    /// Maximum items returned.
    pub limit: u32,
    /// CQL2 filter expression, e.g. `"eo:cloud_cover <= 20"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "filter-lang", skip_serializing_if = "Option::is_none")]
    pub filter_lang: Option<&'static str>,
}

impl SearchQuery {
    pub fn new(
        bbox: &BoundingBox,
        toi: &TimeOfInterest,
        collection: &str,
        limit: u32,
    ) -> Self {
        Self {
            bbox: bbox.to_wsen(),
            datetime: toi.as_catalog_interval(),
            collections: vec![collection.to_string()],
            limit,
            filter: None,
            filter_lang: None,
        }
    }

    /// Restrict results to scenes at or below the given cloud cover (percent).
    pub fn with_max_cloud_cover(mut self, percent: f64) -> Self {
        self.filter = Some(format!("eo:cloud_cover <= {}", percent));
        self.filter_lang = Some("cql2-text");
        self
    }
}

/// A catalog search response page (GeoJSON FeatureCollection).
#[derive(Debug, Clone, Deserialize)]
pub struct SceneCollection {
    pub features: Vec<Scene>,
}

/// A single catalog item.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    /// Unique item identifier.
    pub id: String,

    /// Bounding box `[west, south, east, north]`.
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,

    pub properties: SceneProperties,
}

/// Catalog item properties.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneProperties {
    /// ISO 8601 acquisition timestamp.
    #[serde(default)]
    pub datetime: Option<String>,

    /// Cloud cover percentage (EO extension).
    #[serde(rename = "eo:cloud_cover", default)]
    pub eo_cloud_cover: Option<f64>,

    /// Platform name (e.g. "sentinel-2a").
    #[serde(default)]
    pub platform: Option<String>,

    /// All other properties we don't model explicitly.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Scene {
    /// The acquisition timestamp, required for download requests.
    pub fn datetime(&self) -> FetchResult<&str> {
        self.properties
            .datetime
            .as_deref()
            .ok_or_else(|| FetchError::MissingField("datetime".to_string()))
    }
}

impl SentinelClient {
    /// Execute a catalog search and return the matching scenes.
    ///
    /// Fails with `NoResults` when nothing matches the filters.
    pub async fn search_scenes(&self, query: &SearchQuery) -> FetchResult<Vec<Scene>> {
        let url = format!("{}/api/v1/catalog/1.0.0/search", self.config.base_url);
        debug!(bbox = ?query.bbox, datetime = %query.datetime, "Searching catalog");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(query)
            .send()
            .await
            .map_err(|e| FetchError::Service(format!("catalog search failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Service(format!(
                "catalog search returned HTTP {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let page: SceneCollection = response
            .json()
            .await
            .map_err(|e| FetchError::Service(format!("parsing catalog response: {e}")))?;

        if page.features.is_empty() {
            return Err(FetchError::NoResults);
        }

        info!(count = page.features.len(), "Catalog search matched scenes");
        Ok(page.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagery_common::TimeOfInterest;

    const FIXTURE: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "id": "S2A_MSIL2A_20240615T105621_R094_T30TVK_20240615T164132",
      "bbox": [-3.95, 40.22, -2.84, 41.21],
      "properties": {
        "datetime": "2024-06-15T10:56:21Z",
        "eo:cloud_cover": 5.2,
        "platform": "sentinel-2a",
        "proj:epsg": 32630
      },
      "assets": {}
    },
    {
      "type": "Feature",
      "id": "broken-item-without-datetime",
      "properties": {
        "eo:cloud_cover": 1.0
      }
    }
  ]
}"#;

    #[test]
    fn test_parse_scene_collection() {
        let page: SceneCollection = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(page.features.len(), 2);

        let scene = &page.features[0];
        assert_eq!(
            scene.id,
            "S2A_MSIL2A_20240615T105621_R094_T30TVK_20240615T164132"
        );
        assert_eq!(scene.datetime().unwrap(), "2024-06-15T10:56:21Z");
        assert!((scene.properties.eo_cloud_cover.unwrap() - 5.2).abs() < f64::EPSILON);
        assert_eq!(scene.properties.platform.as_deref(), Some("sentinel-2a"));
        // Unmodeled properties are captured by the flatten
        assert!(scene.properties.extra.contains_key("proj:epsg"));
    }

    #[test]
    fn test_missing_datetime_is_a_typed_error() {
        let page: SceneCollection = serde_json::from_str(FIXTURE).unwrap();
        assert!(matches!(
            page.features[1].datetime(),
            Err(FetchError::MissingField(field)) if field == "datetime"
        ));
    }

    #[test]
    fn test_query_serialization() {
        let bbox = BoundingBox::new(-3.75, 40.38, -3.65, 40.45);
        let toi = TimeOfInterest::parse("2024-06-01/2024-06-30").unwrap();
        let query =
            SearchQuery::new(&bbox, &toi, "sentinel-2-l2a", 50).with_max_cloud_cover(20.0);

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["bbox"], serde_json::json!([-3.75, 40.38, -3.65, 40.45]));
        assert_eq!(
            json["datetime"],
            "2024-06-01T00:00:00Z/2024-06-30T23:59:59Z"
        );
        assert_eq!(json["collections"], serde_json::json!(["sentinel-2-l2a"]));
        assert_eq!(json["limit"], 50);
        assert_eq!(json["filter"], "eo:cloud_cover <= 20");
        assert_eq!(json["filter-lang"], "cql2-text");
    }

    #[test]
    fn test_query_without_filter_omits_filter_fields() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let toi = TimeOfInterest::parse("2024-01-01/2024-01-31").unwrap();
        let query = SearchQuery::new(&bbox, &toi, "sentinel-2-l2a", 10);

        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("filter").is_none());
        assert!(json.get("filter-lang").is_none());
    }
}
