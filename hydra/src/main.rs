use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hydra::models::DEFAULT_JPG_QUALITY;
use hydra::{Client, ClientConfig, FileEntry, RecognizeOptions};

const API_KEY_ENV: &str = "HYDRA_API_KEY";

#[derive(Parser)]
#[command(name = "hydra")]
#[command(about = "Recognize text in PDFs and images with the Siftrics Hydra API")]
struct Args {
    /// Data source to run the files through
    #[arg(long)]
    data_source_id: String,

    /// Files to recognize (.pdf, .bmp, .gif, .jpeg, .jpg, .png)
    #[arg(required_unless_present = "entries", conflicts_with = "entries")]
    files: Vec<PathBuf>,

    /// JSON file holding an array of {"mimeType", "base64File"} entries
    #[arg(long)]
    entries: Option<PathBuf>,

    /// API key; falls back to HYDRA_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long)]
    do_faster: bool,

    #[arg(long)]
    return_transformed_images: bool,

    #[arg(long)]
    return_jpgs: bool,

    /// JPEG quality for returned images, 1-100
    #[arg(long, default_value_t = DEFAULT_JPG_QUALITY)]
    jpg_quality: u32,

    /// Override the API root, e.g. for a staging deployment
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydra=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var(API_KEY_ENV)
            .with_context(|| format!("No API key given; pass --api-key or set {API_KEY_ENV}"))?,
    };

    let mut config = ClientConfig::default();
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config = config.with_timeout_secs(timeout_secs);
    }
    let client = Client::with_config(api_key, config).context("Failed to create Hydra client")?;

    let options = RecognizeOptions {
        do_faster: args.do_faster,
        return_transformed_images: args.return_transformed_images,
        return_jpgs: args.return_jpgs,
        jpg_quality: args.jpg_quality,
    };

    let rows = match args.entries {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array", path.display()))?;
            let entries = FileEntry::from_json_entries(&values)?;

            tracing::info!(entries = entries.len(), "Recognizing pre-encoded files");
            client
                .recognize_base64(&args.data_source_id, &entries, &options)
                .await?
        }
        None => {
            tracing::info!(files = args.files.len(), "Recognizing files");
            client
                .recognize(&args.data_source_id, &args.files, &options)
                .await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&rows)?);

    Ok(())
}
