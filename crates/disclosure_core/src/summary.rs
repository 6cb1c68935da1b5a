use std::fmt;

use crate::{DownloadOutcome, SavedKind};

/// Pipeline phases, run strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collect,
    Extract,
    ResolveAndDownload,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Collect => write!(f, "collect"),
            Phase::Extract => write!(f, "extract"),
            Phase::ResolveAndDownload => write!(f, "resolve+download"),
            Phase::Done => write!(f, "done"),
        }
    }
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub candidate_links: usize,
    pub resolution_failures: usize,
    pub invalid_urls: usize,
    pub downloaded: usize,
    pub html_landing_pages: usize,
    pub already_present: usize,
    pub rejected_content_type: usize,
    pub download_failures: usize,
}

impl RunSummary {
    pub fn record_download(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Saved {
                kind: SavedKind::Pdf,
                ..
            } => self.downloaded += 1,
            DownloadOutcome::Saved {
                kind: SavedKind::HtmlLandingPage,
                ..
            } => self.html_landing_pages += 1,
            DownloadOutcome::AlreadyExists { .. } => self.already_present += 1,
        }
    }

    /// Files created on disk during this run.
    pub fn files_written(&self) -> usize {
        self.downloaded + self.html_landing_pages
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages={} (failed {}) links={} unresolved={} invalid_urls={} downloaded={} \
             html_pages={} already_present={} bad_content_type={} failed_downloads={}",
            self.pages_fetched + self.pages_failed,
            self.pages_failed,
            self.candidate_links,
            self.resolution_failures,
            self.invalid_urls,
            self.downloaded,
            self.html_landing_pages,
            self.already_present,
            self.rejected_content_type,
            self.download_failures,
        )
    }
}
