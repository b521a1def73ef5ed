//! Sentinel-2 imagery fetch CLI.
//!
//! Validates an area of interest, searches the provider catalog for a
//! matching scene and downloads a rendered image:
//! - AOI bounding with a 100 km per-side limit
//! - True-color or classified NDVI renderings
//! - Legend output alongside NDVI imagery

mod fetch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(about = "Sentinel-2 imagery fetcher for a validated area of interest")]
struct Args {
    /// Path to the AOI file (GeoJSON format)
    #[arg(long)]
    aoi_file: PathBuf,

    /// Time of interest in the format YYYY-MM-DD/YYYY-MM-DD
    /// (default: the last 50 days)
    #[arg(long)]
    toi: Option<String>,

    /// Type of image to request: 'visual' or 'ndvi'
    #[arg(long)]
    image_type: String,

    /// Format of the downloaded image (only 'png' is supported)
    #[arg(long, default_value = "png")]
    image_format: String,

    /// Sentinel Hub client id (falls back to the client_id env var)
    #[arg(long)]
    client_id: Option<String>,

    /// Sentinel Hub client secret (falls back to the client_secret env var)
    #[arg(long)]
    client_secret: Option<String>,

    /// Data collection to search
    #[arg(long, default_value = "sentinel-2-l2a")]
    collection: String,

    /// Maximum scene cloud cover, in percent
    #[arg(long, default_value = "20")]
    max_cloud_cover: f64,

    /// Maximum number of catalog results to request
    #[arg(long, default_value = "50")]
    limit: u32,

    /// Where to write the downloaded image
    #[arg(short, long, default_value = "scene.png")]
    output: PathBuf,

    /// Provider API base URL
    #[arg(long, env = "SH_BASE_URL", default_value = sentinel_client::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    // Single reporting boundary: every error surfaces here exactly once.
    match fetch::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fetch failed");
            ExitCode::FAILURE
        }
    }
}
