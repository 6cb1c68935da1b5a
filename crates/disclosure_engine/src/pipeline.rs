use std::path::PathBuf;

use disclosure_core::{extract_pdf_urls, is_url_valid, DownloadOutcome, Phase, RunSummary, SavedKind};
use disclosure_logging::{harvest_error, harvest_info, harvest_warn};

use crate::{PageFetcher, PdfDownloader, RedirectResolver};

/// Collect pages, extract candidate links, then resolve and download each link in turn.
///
/// Every failure is confined to the page or link it happened on; the run
/// always reaches [`Phase::Done`].
pub struct Pipeline<'a> {
    fetcher: &'a dyn PageFetcher,
    resolver: &'a dyn RedirectResolver,
    downloader: &'a PdfDownloader,
    output_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        resolver: &'a dyn RedirectResolver,
        downloader: &'a PdfDownloader,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            downloader,
            output_dir: output_dir.into(),
        }
    }

    pub async fn run(&self, seed_urls: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();

        harvest_info!("phase={} seeds={}", Phase::Collect, seed_urls.len());
        let bodies = self.collect(seed_urls, &mut summary).await;

        harvest_info!("phase={}", Phase::Extract);
        let links = extract_links(&bodies);
        summary.candidate_links = links.len();

        harvest_info!("phase={} links={}", Phase::ResolveAndDownload, links.len());
        for link in &links {
            self.process_link(link, &mut summary).await;
        }

        harvest_info!("phase={} {}", Phase::Done, summary);
        summary
    }

    /// One body per seed, in seed order; a failed fetch contributes `""`.
    async fn collect(&self, seed_urls: &[String], summary: &mut RunSummary) -> Vec<String> {
        let mut bodies = Vec::with_capacity(seed_urls.len());
        for url in seed_urls {
            harvest_info!("Scraping {}", url);
            match self.fetcher.fetch_page(url).await {
                Ok(body) => {
                    summary.pages_fetched += 1;
                    bodies.push(body);
                }
                Err(err) => {
                    harvest_error!("Error scraping {}: {}", url, err);
                    summary.pages_failed += 1;
                    bodies.push(String::new());
                }
            }
        }
        bodies
    }

    async fn process_link(&self, link: &str, summary: &mut RunSummary) {
        let resolved = match self.resolver.resolve(link).await {
            Ok(resolved) => resolved,
            Err(err) => {
                harvest_error!("Browser error navigating {}: {}", link, err);
                summary.resolution_failures += 1;
                return;
            }
        };

        if !is_url_valid(&resolved) {
            harvest_warn!("Skipping {}: resolved to invalid URL {:?}", link, resolved);
            summary.invalid_urls += 1;
            return;
        }

        match self.downloader.download(&resolved, &self.output_dir).await {
            Ok(outcome) => {
                log_outcome(&resolved, &outcome);
                summary.record_download(&outcome);
            }
            Err(err) => match err.rejected_content_type() {
                Some(content_type) => {
                    harvest_warn!("Invalid content type for {}: {:?}", resolved, content_type);
                    summary.rejected_content_type += 1;
                }
                None => {
                    harvest_error!("Failed to download {}: {}", resolved, err);
                    summary.download_failures += 1;
                }
            },
        }
    }
}

fn extract_links(bodies: &[String]) -> Vec<String> {
    let links = extract_pdf_urls(&bodies.concat());
    if links.is_empty() {
        harvest_warn!("No PDF URLs found.");
    }
    links
}

fn log_outcome(url: &str, outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Saved {
            path,
            bytes,
            kind: SavedKind::Pdf,
        } => harvest_info!("Downloaded: {} -> {} ({} bytes)", url, path.display(), bytes),
        DownloadOutcome::Saved {
            path,
            kind: SavedKind::HtmlLandingPage,
            ..
        } => harvest_warn!(
            "Saved HTML landing page instead of a PDF: {} -> {}",
            url,
            path.display()
        ),
        DownloadOutcome::AlreadyExists { path } => {
            harvest_info!("File already exists, skipping: {}", path.display())
        }
    }
}
