//! Error types for sentinel-fetch crates.

use thiserror::Error;

/// Result type alias using FetchError.
pub type FetchResult<T> = Result<T, FetchError>;

/// Primary error type for imagery-fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    // === AOI Errors ===
    #[error("Invalid AOI geometry: {0}")]
    Geometry(String),

    #[error(
        "AOI exceeds the 100 km x 100 km limit ({width_km:.2} km x {height_km:.2} km)"
    )]
    AreaTooLarge { width_km: f64, height_km: f64 },

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    // === Catalog Errors ===
    #[error("No scenes found for the given AOI and time range")]
    NoResults,

    #[error("Scene is missing required property: {0}")]
    MissingField(String),

    // === Collaborator Errors ===
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Imagery service error: {0}")]
    Service(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::time::TimeParseError> for FetchError {
    fn from(err: crate::time::TimeParseError) -> Self {
        FetchError::InvalidTime(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_too_large_message_carries_dimensions() {
        let err = FetchError::AreaTooLarge {
            width_km: 222.64,
            height_km: 222.64,
        };
        let msg = err.to_string();
        assert!(msg.contains("222.64 km x 222.64 km"));
        assert!(msg.contains("100 km x 100 km"));
    }
}
