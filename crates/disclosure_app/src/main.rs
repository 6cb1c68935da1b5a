//! Downloads product ingredient-disclosure sheets linked from a list of product pages.
mod config;
mod logging;

use std::path::Path;

use anyhow::Context;
use config::{HarvestConfig, CONFIG_FILENAME};
use disclosure_engine::{
    ensure_output_dir, BrowserResolver, PdfDownloader, Pipeline, ReqwestPageFetcher,
};
use disclosure_logging::{harvest_error, harvest_info};

fn main() -> anyhow::Result<()> {
    let config = HarvestConfig::load(Path::new(CONFIG_FILENAME))
        .with_context(|| format!("loading {CONFIG_FILENAME}"))?;
    logging::initialize(config.log_destination, &config.log_file);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(run(config))
}

async fn run(config: HarvestConfig) -> anyhow::Result<()> {
    // Every download would fail without the directory, so stop before scraping.
    if let Err(err) = ensure_output_dir(&config.output_dir) {
        harvest_error!(
            "Error creating directory {}: {}",
            config.output_dir.display(),
            err
        );
        return Err(err).context("preparing output directory");
    }

    let resolver = BrowserResolver::new(config.browser_settings())
        .context("no usable Chromium/Chrome executable for redirect resolution")?;
    let fetcher = ReqwestPageFetcher::new(config.fetch_settings())?;
    let downloader = PdfDownloader::new(config.download_settings())?;

    harvest_info!(
        "Harvesting {} seed pages into {}",
        config.seed_urls.len(),
        config.output_dir.display()
    );
    let summary = Pipeline::new(&fetcher, &resolver, &downloader, config.output_dir.clone())
        .run(&config.seed_urls)
        .await;
    harvest_info!("Run finished: {} new files", summary.files_written());
    Ok(())
}
