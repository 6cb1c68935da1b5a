use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::PersistError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type:?}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a candidate link could not be resolved to its final address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("browser unavailable: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("page load timed out after {0:?}")]
    Timeout(Duration),
    #[error("browser reported no current url")]
    MissingUrl,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl DownloadError {
    /// The rejected `Content-Type`, when the response was neither PDF nor HTML.
    pub fn rejected_content_type(&self) -> Option<&str> {
        match self {
            DownloadError::Fetch(FetchError {
                kind: FailureKind::UnsupportedContentType { content_type },
                ..
            }) => Some(content_type.as_str()),
            _ => None,
        }
    }
}
