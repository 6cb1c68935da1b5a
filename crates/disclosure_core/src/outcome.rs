use std::fmt;
use std::path::PathBuf;

/// What a saved response turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedKind {
    Pdf,
    /// An HTML page served where a PDF was expected.
    HtmlLandingPage,
}

impl fmt::Display for SavedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavedKind::Pdf => write!(f, "pdf"),
            SavedKind::HtmlLandingPage => write!(f, "html landing page"),
        }
    }
}

/// Maps a `Content-Type` header value to the kind of document it announces.
///
/// Only PDF and HTML are accepted; anything else (including a missing
/// header, passed as `""`) yields `None`.
pub fn classify_content_type(content_type: &str) -> Option<SavedKind> {
    let lower = content_type.to_ascii_lowercase();
    if lower.contains("application/pdf") {
        Some(SavedKind::Pdf)
    } else if lower.contains("text/html") {
        Some(SavedKind::HtmlLandingPage)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved {
        path: PathBuf,
        bytes: u64,
        kind: SavedKind,
    },
    /// A file with the same sanitized name was already on disk; nothing was fetched.
    AlreadyExists { path: PathBuf },
}

impl DownloadOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            DownloadOutcome::Saved { path, .. } | DownloadOutcome::AlreadyExists { path } => path,
        }
    }
}
