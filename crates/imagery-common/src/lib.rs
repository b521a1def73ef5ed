//! Common types and utilities shared across all sentinel-fetch crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod scheme;
pub mod time;

pub use bbox::{BoundingBox, KM_PER_DEGREE};
pub use crs::CrsCode;
pub use error::{FetchError, FetchResult};
pub use scheme::{ClassBand, ClassificationScheme, Color};
pub use time::TimeOfInterest;
