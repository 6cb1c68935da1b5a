//! Final-URL resolution through a headless Chromium.
//!
//! Some product-sheet links land on a page that forwards the visitor with
//! JavaScript, so an HTTP client sees the wrong document. The browser
//! resolver loads the link in a real browser, waits for the page to settle
//! and reports the address the browser ended up on.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use disclosure_logging::{harvest_debug, harvest_warn};
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::ResolveError;

/// Chromium flags on top of chromiumoxide's headless defaults.
const LAUNCH_ARGS: [&str; 2] = ["--disable-gpu", "--disable-dev-shm-usage"];

#[async_trait::async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Address `url` finally settles on.
    async fn resolve(&self, url: &str) -> Result<String, ResolveError>;
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub page_load_timeout: Duration,
    /// Pause after load so client-side redirects can finish.
    pub settle_delay: Duration,
    /// Upper bound on a graceful browser shutdown before the process is killed.
    pub close_timeout: Duration,
    /// Explicit Chromium binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            page_load_timeout: Duration::from_secs(60),
            settle_delay: Duration::from_secs(2),
            close_timeout: Duration::from_secs(5),
            executable: None,
        }
    }
}

/// Launches one browser per call and always tears it down before returning.
#[derive(Debug, Clone)]
pub struct BrowserResolver {
    settings: BrowserSettings,
}

impl BrowserResolver {
    /// Fails when no Chromium executable can be found, or when the
    /// configured one is not a file.
    pub fn new(settings: BrowserSettings) -> Result<Self, ResolveError> {
        if let Some(path) = &settings.executable {
            if !path.is_file() {
                return Err(ResolveError::Launch(format!(
                    "browser executable {} does not exist",
                    path.display()
                )));
            }
        }
        let resolver = Self { settings };
        resolver.browser_config()?;
        Ok(resolver)
    }

    fn browser_config(&self) -> Result<BrowserConfig, ResolveError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(LAUNCH_ARGS)
            .request_timeout(self.settings.page_load_timeout);
        if let Some(path) = &self.settings.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(ResolveError::Launch)
    }
}

#[async_trait::async_trait]
impl RedirectResolver for BrowserResolver {
    async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        let session = BrowserSession::launch(self.browser_config()?).await?;
        let result = session.final_url(url, &self.settings).await;
        session.shutdown(self.settings.close_timeout).await;
        result
    }
}

/// One running browser plus the task driving its CDP connection.
///
/// `shutdown` is the normal exit. If the session is dropped instead (panic or
/// cancelled future) the handler task is aborted and chromiumoxide kills the
/// child process when `Browser` drops.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig) -> Result<Self, ResolveError> {
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ResolveError::Launch(err.to_string()))?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });
        Ok(Self { browser, handler })
    }

    async fn final_url(&self, url: &str, settings: &BrowserSettings) -> Result<String, ResolveError> {
        let navigation_error = |err: chromiumoxide::error::CdpError| ResolveError::Navigation {
            url: url.to_string(),
            message: err.to_string(),
        };

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(navigation_error)?;

        match tokio::time::timeout(settings.page_load_timeout, page.goto(url)).await {
            Err(_) => return Err(ResolveError::Timeout(settings.page_load_timeout)),
            Ok(Err(err)) => return Err(navigation_error(err)),
            Ok(Ok(_)) => {}
        }

        tokio::time::sleep(settings.settle_delay).await;

        let current = page.url().await.map_err(navigation_error)?;
        harvest_debug!("Browser settled on {:?} for {}", current, url);
        current.ok_or(ResolveError::MissingUrl)
    }

    async fn shutdown(mut self, close_timeout: Duration) {
        let closed = matches!(
            tokio::time::timeout(close_timeout, self.browser.close()).await,
            Ok(Ok(_))
        );
        let exited = closed
            && matches!(
                tokio::time::timeout(close_timeout, self.browser.wait()).await,
                Ok(Ok(_))
            );
        if !exited {
            harvest_warn!("Browser did not close cleanly; killing it");
            if let Some(Err(err)) = self.browser.kill().await {
                harvest_warn!("Failed to kill browser process: {}", err);
            }
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_match_page_load_and_settle_budget() {
        let settings = BrowserSettings::default();
        assert_eq!(settings.page_load_timeout, Duration::from_secs(60));
        assert_eq!(settings.settle_delay, Duration::from_secs(2));
        assert!(settings.executable.is_none());
    }

    fn missing_executable() -> BrowserSettings {
        BrowserSettings {
            executable: Some(PathBuf::from("/nonexistent/chrome")),
            ..BrowserSettings::default()
        }
    }

    #[test]
    fn missing_executable_fails_at_startup() {
        match BrowserResolver::new(missing_executable()) {
            Err(ResolveError::Launch(message)) => {
                assert!(message.contains("/nonexistent/chrome"), "{message}")
            }
            other => panic!("expected launch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn launch_failure_is_reported_per_link() {
        // Bypasses the startup check to reach the per-link launch path.
        let resolver = BrowserResolver {
            settings: missing_executable(),
        };
        let result = resolver.resolve("https://example.com/pdf/?productID=1").await;
        assert!(
            matches!(result, Err(ResolveError::Launch(_))),
            "unexpected result: {result:?}"
        );
    }
}
