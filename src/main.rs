//! # article_harvest
//!
//! Collects the author's posts from Qiita and Hatena Blog and writes one
//! Hugo content file per post, so the personal site lists everything in one
//! place with a link back to the original.
//!
//! ## Usage
//!
//! ```sh
//! QiitaURL=https://qiita.com/api/v2/users/<id>/items \
//! HatenaURL=https://blog.hatena.ne.jp/<id>/<blog>/atom/entry \
//! HatenaUsername=<id> HatenaApiKey=<key> \
//! article_harvest
//! ```
//!
//! ## Architecture
//!
//! The run is a straight pipeline:
//! 1. **Fetch**: Qiita JSON listing and the paginated Hatena AtomPub feed
//! 2. **Normalize**: both become `ArticleRecord`s, validated at the boundary
//! 3. **Merge**: one list, newest first
//! 4. **Output**: `<output-dir>/<epoch-millis>.md`, never overwriting

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use config::Config;
use fetch::HttpFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional and read before tracing so it can carry RUST_LOG.
    let dotenv_path = dotenvy::dotenv().ok();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_harvest starting up");

    if let Some(path) = dotenv_path {
        debug!(path = %path.display(), "Loaded .env");
    }

    let args = Cli::parse();
    let config = Config::try_from(args)?;
    info!(
        qiita = %config.qiita_url,
        hatena = %config.hatena.start_url,
        output_dir = %config.output_dir.display(),
        "Loaded configuration"
    );

    let fetcher = HttpFetcher::new();
    let summary = match pipeline::run(&config, &fetcher).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Harvest failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        written = summary.written.len(),
        skipped = summary.skipped,
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
