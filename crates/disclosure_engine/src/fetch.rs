use std::time::Duration;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
    pub redirect_limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            redirect_limit: 10,
        }
    }
}

/// Source of seed page HTML.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(settings.request_timeout, settings.redirect_limit)?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
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
            ));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

pub(crate) fn build_client(
    request_timeout: Duration,
    redirect_limit: usize,
) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .redirect(reqwest::redirect::Policy::limited(redirect_limit))
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
