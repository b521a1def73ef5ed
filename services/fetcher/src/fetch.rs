//! Fetch orchestration: validate the AOI, search the catalog, download the
//! rendered scene and write the output.

use std::path::{Path, PathBuf};

use imagery_common::scheme::ndvi_display_scheme;
use imagery_common::time::DEFAULT_WINDOW_DAYS;
use imagery_common::{FetchResult, TimeOfInterest};
use renderer::{decode_image, encode_png, render_legend_strip};
use sentinel_client::{
    generate_evalscript, ClientConfig, ImageRequest, ImageType, OutputFormat, SearchQuery,
    SentinelClient,
};
use tracing::info;

use crate::Args;

pub async fn run(args: Args) -> FetchResult<()> {
    let image_type = ImageType::parse(&args.image_type)?;
    let format = OutputFormat::parse(&args.image_format)?;

    info!(path = %args.aoi_file.display(), "Reading AOI file");
    let aoi = aoi::load_aoi(&args.aoi_file)?;
    info!(
        bbox = %aoi.bbox,
        width_km = format!("{:.2}", aoi.bbox.width_km()),
        height_km = format!("{:.2}", aoi.bbox.height_km()),
        "AOI validated"
    );

    let toi = match &args.toi {
        Some(s) => TimeOfInterest::parse(s)?,
        None => {
            let toi = TimeOfInterest::last_days(DEFAULT_WINDOW_DAYS);
            info!(toi = %toi, "No time range given, using the last 50 days");
            toi
        }
    };

    let client = SentinelClient::connect(client_config(&args)?).await?;

    info!(toi = %toi, collection = %args.collection, "Searching for scenes");
    let query = SearchQuery::new(&aoi.bbox, &toi, &args.collection, args.limit)
        .with_max_cloud_cover(args.max_cloud_cover);
    let scenes = client.search_scenes(&query).await?;

    let scene = &scenes[0];
    let datetime = scene.datetime()?.to_string();
    info!(scene = %scene.id, datetime = %datetime, "Selected scene");

    let request = ImageRequest {
        evalscript: generate_evalscript(image_type),
        bbox: aoi.bbox,
        crs: aoi.crs,
        collection: args.collection.clone(),
        datetime,
        max_cloud_cover: args.max_cloud_cover,
        format,
    };
    let bytes = client.download_image(&request).await?;

    // Decode before writing so a bad payload fails here, not in a viewer.
    let (_, width, height) = decode_image(&bytes)?;
    info!(width, height, "Decoded downloaded image");

    tokio::fs::write(&args.output, &bytes).await?;
    info!(path = %args.output.display(), "Image saved");

    if image_type == ImageType::Ndvi {
        write_legend(&args.output).await?;
    }

    Ok(())
}

/// Build the client configuration from CLI flags, falling back to the
/// `client_id`/`client_secret` environment variables (loaded from `.env`
/// when present).
fn client_config(args: &Args) -> FetchResult<ClientConfig> {
    let config = match (&args.client_id, &args.client_secret) {
        (Some(id), Some(secret)) => ClientConfig::new(id.clone(), secret.clone()),
        _ => ClientConfig::from_env()?,
    };

    Ok(config.with_base_url(&args.base_url))
}

/// Write the NDVI legend strip next to the image and log the class table.
async fn write_legend(output: &Path) -> FetchResult<()> {
    let scheme = ndvi_display_scheme();

    for (label, color) in scheme.legend() {
        info!(class = label, color = %color.to_hex(), "Legend entry");
    }

    let (pixels, width, height) = render_legend_strip(&scheme, 40, 20);
    let png = encode_png(&pixels, width as u32, height as u32)?;

    let path = legend_path(output);
    tokio::fs::write(&path, &png).await?;
    info!(path = %path.display(), "Legend saved");

    Ok(())
}

fn legend_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    output.with_file_name(format!("{}_legend.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_path_sits_next_to_the_output() {
        assert_eq!(
            legend_path(Path::new("/data/out/madrid.png")),
            Path::new("/data/out/madrid_legend.png")
        );
        assert_eq!(
            legend_path(Path::new("scene.png")),
            Path::new("scene_legend.png")
        );
    }
}
