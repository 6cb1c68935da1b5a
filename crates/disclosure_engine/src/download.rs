use std::path::Path;
use std::time::Duration;

use disclosure_core::{classify_content_type, url_to_filename, DownloadOutcome, SavedKind};
use disclosure_logging::harvest_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::fetch::{build_client, map_reqwest_error};
use crate::persist::{file_exists, CommitOutcome, StreamingFileWriter};
use crate::{DownloadError, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Size of the buffered writer between the response stream and disk.
    pub chunk_size: usize,
    /// Save `text/html` responses as well; when false they are rejected like any other type.
    pub keep_html_landing_pages: bool,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(900),
            redirect_limit: 10,
            chunk_size: 8192,
            keep_html_landing_pages: true,
        }
    }
}

/// Saves resolved document URLs under their sanitized filenames, at most once per name.
#[derive(Debug, Clone)]
pub struct PdfDownloader {
    client: reqwest::Client,
    settings: DownloadSettings,
}

impl PdfDownloader {
    pub fn new(settings: DownloadSettings) -> Result<Self, FetchError> {
        let client = build_client(settings.request_timeout, settings.redirect_limit)?;
        Ok(Self { client, settings })
    }

    pub async fn download(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let filename = url_to_filename(url);
        let target = output_dir.join(&filename);
        if file_exists(&target) {
            return Ok(DownloadOutcome::AlreadyExists { path: target });
        }

        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )
            .into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let kind = self
            .accepted_kind(&content_type)
            .ok_or_else(|| {
                FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: content_type.clone(),
                    },
                    "expected application/pdf or text/html",
                )
            })?;

        let mut writer = StreamingFileWriter::create(output_dir, self.settings.chunk_size)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            writer.write_chunk(&chunk)?;
        }
        harvest_debug!("Streamed {} bytes from {}", writer.bytes_written(), url);

        match writer.commit(&filename)? {
            CommitOutcome::Written { path, bytes } => Ok(DownloadOutcome::Saved { path, bytes, kind }),
            CommitOutcome::AlreadyExists { path } => Ok(DownloadOutcome::AlreadyExists { path }),
        }
    }

    fn accepted_kind(&self, content_type: &str) -> Option<SavedKind> {
        match classify_content_type(content_type) {
            Some(SavedKind::HtmlLandingPage) if !self.settings.keep_html_landing_pages => None,
            kind => kind,
        }
    }
}
