//! Process API download requests.
//!
//! Builds the render-and-download request body (evalscript + bounds +
//! data filter + response format) and returns the provider's encoded
//! image bytes. Failed requests surface as typed errors; no retry is
//! attempted.

use imagery_common::{BoundingBox, CrsCode, FetchError, FetchResult};
use serde::Serialize;
use tracing::info;

use crate::SentinelClient;

/// Supported output formats for downloaded imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
}

impl OutputFormat {
    /// Parse a user-facing format name. Anything but `png` is unsupported.
    pub fn parse(s: &str) -> FetchResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            other => Err(FetchError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// Everything needed to render and download one scene.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub evalscript: String,
    pub bbox: BoundingBox,
    pub crs: CrsCode,
    pub collection: String,
    /// Scene acquisition time, requested as a degenerate from/to interval.
    pub datetime: String,
    /// Maximum cloud coverage, percent.
    pub max_cloud_cover: f64,
    pub format: OutputFormat,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ProcessBody<'a> {
    input: Input<'a>,
    output: Output,
    evalscript: &'a str,
}

#[derive(Serialize)]
struct Input<'a> {
    bounds: Bounds<'a>,
    data: Vec<DataSpec<'a>>,
}

#[derive(Serialize)]
struct Bounds<'a> {
    bbox: [f64; 4],
    properties: BoundsProperties<'a>,
}

#[derive(Serialize)]
struct BoundsProperties<'a> {
    crs: &'a str,
}

#[derive(Serialize)]
struct DataSpec<'a> {
    #[serde(rename = "type")]
    collection: &'a str,
    #[serde(rename = "dataFilter")]
    data_filter: DataFilter<'a>,
}

#[derive(Serialize)]
struct DataFilter<'a> {
    #[serde(rename = "timeRange")]
    time_range: TimeRangeSpec<'a>,
    #[serde(rename = "maxCloudCoverage")]
    max_cloud_coverage: f64,
}

#[derive(Serialize)]
struct TimeRangeSpec<'a> {
    from: &'a str,
    to: &'a str,
}

#[derive(Serialize)]
struct Output {
    responses: Vec<ResponseSpec>,
}

#[derive(Serialize)]
struct ResponseSpec {
    identifier: &'static str,
    format: FormatSpec,
}

#[derive(Serialize)]
struct FormatSpec {
    #[serde(rename = "type")]
    mime: &'static str,
}

impl ImageRequest {
    fn body(&self) -> ProcessBody<'_> {
        ProcessBody {
            input: Input {
                bounds: Bounds {
                    bbox: self.bbox.to_wsen(),
                    properties: BoundsProperties {
                        crs: self.crs.as_url(),
                    },
                },
                data: vec![DataSpec {
                    collection: &self.collection,
                    data_filter: DataFilter {
                        time_range: TimeRangeSpec {
                            from: &self.datetime,
                            to: &self.datetime,
                        },
                        max_cloud_coverage: self.max_cloud_cover,
                    },
                }],
            },
            output: Output {
                responses: vec![ResponseSpec {
                    identifier: "default",
                    format: FormatSpec {
                        mime: self.format.mime_type(),
                    },
                }],
            },
            evalscript: &self.evalscript,
        }
    }
}

impl SentinelClient {
    /// Render and download one image, returning the raw encoded bytes.
    pub async fn download_image(&self, request: &ImageRequest) -> FetchResult<Vec<u8>> {
        let url = format!("{}/api/v1/process", self.config.base_url);
        info!(
            scene_time = %request.datetime,
            collection = %request.collection,
            "Downloading image"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, request.format.mime_type())
            .json(&request.body())
            .send()
            .await
            .map_err(|e| FetchError::Service(format!("process request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Service(format!(
                "process endpoint returned HTTP {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Service(format!("reading image body: {e}")))?;

        info!(bytes = bytes.len(), "Image downloaded");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evalscript::{generate_evalscript, ImageType};

    #[test]
    fn test_parse_output_format() {
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("PNG").unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::parse("tiff"),
            Err(FetchError::UnsupportedFormat(f)) if f == "tiff"
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ImageRequest {
            evalscript: generate_evalscript(ImageType::Visual),
            bbox: BoundingBox::new(-3.75, 40.38, -3.65, 40.45),
            crs: CrsCode::Epsg4326,
            collection: "sentinel-2-l2a".to_string(),
            datetime: "2024-06-15T10:56:21Z".to_string(),
            max_cloud_cover: 20.0,
            format: OutputFormat::Png,
        };

        let json = serde_json::to_value(request.body()).unwrap();

        assert_eq!(
            json["input"]["bounds"]["bbox"],
            serde_json::json!([-3.75, 40.38, -3.65, 40.45])
        );
        assert_eq!(
            json["input"]["bounds"]["properties"]["crs"],
            "http://www.opengis.net/def/crs/EPSG/0/4326"
        );

        let data = &json["input"]["data"][0];
        assert_eq!(data["type"], "sentinel-2-l2a");
        assert_eq!(
            data["dataFilter"]["timeRange"]["from"],
            "2024-06-15T10:56:21Z"
        );
        assert_eq!(
            data["dataFilter"]["timeRange"]["to"],
            "2024-06-15T10:56:21Z"
        );
        assert_eq!(data["dataFilter"]["maxCloudCoverage"], 20.0);

        let response = &json["output"]["responses"][0];
        assert_eq!(response["identifier"], "default");
        assert_eq!(response["format"]["type"], "image/png");

        assert!(json["evalscript"]
            .as_str()
            .unwrap()
            .starts_with("//VERSION=3"));
    }
}
