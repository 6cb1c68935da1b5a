use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use disclosure_engine::{BrowserSettings, DownloadSettings, FetchSettings};
use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::{LogDestination, DEFAULT_LOG_FILE};

/// Optional run configuration, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "harvest.ron";

/// Product pages scraped when the config file names no seeds.
const DEFAULT_SEEDS: &str = include_str!("../seeds.ron");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("built-in seed list is malformed: {0}")]
    DefaultSeeds(ron::error::SpannedError),
}

/// On-disk shape of `harvest.ron`; every field may be omitted.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    output_dir: Option<PathBuf>,
    seed_urls: Option<Vec<String>>,
    page_timeout_secs: Option<u64>,
    download_timeout_secs: Option<u64>,
    navigation_timeout_secs: Option<u64>,
    settle_secs: Option<u64>,
    keep_html_landing_pages: Option<bool>,
    browser_executable: Option<PathBuf>,
    log_destination: Option<LogDestination>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    pub output_dir: PathBuf,
    pub seed_urls: Vec<String>,
    pub page_timeout: Duration,
    pub download_timeout: Duration,
    pub navigation_timeout: Duration,
    pub settle_delay: Duration,
    pub keep_html_landing_pages: bool,
    pub browser_executable: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl HarvestConfig {
    /// Reads `path` if it exists; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse_at(&text, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Self::from_file(ConfigFile::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::parse_at(text, Path::new(CONFIG_FILENAME))
    }

    fn parse_at(text: &str, path: &Path) -> Result<Self, ConfigError> {
        // Plain values are accepted for optional fields, without `Some(..)`.
        let file: ConfigFile = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let fetch = FetchSettings::default();
        let download = DownloadSettings::default();
        let browser = BrowserSettings::default();
        let seed_urls = match file.seed_urls {
            Some(seeds) => seeds,
            None => default_seed_urls()?,
        };

        Ok(Self {
            output_dir: file.output_dir.unwrap_or_else(|| PathBuf::from("PDFs")),
            seed_urls,
            page_timeout: secs_or(file.page_timeout_secs, fetch.request_timeout),
            download_timeout: secs_or(file.download_timeout_secs, download.request_timeout),
            navigation_timeout: secs_or(file.navigation_timeout_secs, browser.page_load_timeout),
            settle_delay: secs_or(file.settle_secs, browser.settle_delay),
            keep_html_landing_pages: file
                .keep_html_landing_pages
                .unwrap_or(download.keep_html_landing_pages),
            browser_executable: file.browser_executable,
            log_destination: file.log_destination.unwrap_or_default(),
            log_file: file
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.page_timeout,
            ..FetchSettings::default()
        }
    }

    pub fn download_settings(&self) -> DownloadSettings {
        DownloadSettings {
            request_timeout: self.download_timeout,
            keep_html_landing_pages: self.keep_html_landing_pages,
            ..DownloadSettings::default()
        }
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            page_load_timeout: self.navigation_timeout,
            settle_delay: self.settle_delay,
            executable: self.browser_executable.clone(),
            ..BrowserSettings::default()
        }
    }
}

fn secs_or(secs: Option<u64>, default: Duration) -> Duration {
    secs.map(Duration::from_secs).unwrap_or(default)
}

fn default_seed_urls() -> Result<Vec<String>, ConfigError> {
    ron::from_str(DEFAULT_SEEDS).map_err(ConfigError::DefaultSeeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_core::is_url_valid;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = HarvestConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("PDFs"));
        assert_eq!(config.page_timeout, Duration::from_secs(60));
        assert_eq!(config.download_timeout, Duration::from_secs(900));
        assert_eq!(config.navigation_timeout, Duration::from_secs(60));
        assert_eq!(config.settle_delay, Duration::from_secs(2));
        assert!(config.keep_html_landing_pages);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_file, PathBuf::from("harvest.log"));
        assert_eq!(config.seed_urls, default_seed_urls().unwrap());
    }

    #[test]
    fn built_in_seeds_are_valid_urls() {
        let seeds = default_seed_urls().unwrap();
        assert_eq!(seeds.len(), 612);
        assert!(seeds.iter().all(|seed| is_url_valid(seed)));
    }

    #[test]
    fn file_values_override_defaults() {
        let text = r#"(
            output_dir: "out/sheets",
            seed_urls: ["https://example.com/a.aspx"],
            download_timeout_secs: 30,
            settle_secs: 5,
            keep_html_landing_pages: false,
            log_destination: Both,
            log_file: "logs/run.log",
        )"#;
        let config = HarvestConfig::parse(text).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out/sheets"));
        assert_eq!(config.seed_urls, vec!["https://example.com/a.aspx".to_string()]);
        assert_eq!(config.page_timeout, Duration::from_secs(60));
        assert_eq!(config.download_settings().request_timeout, Duration::from_secs(30));
        assert!(!config.download_settings().keep_html_landing_pages);
        assert_eq!(config.browser_settings().settle_delay, Duration::from_secs(5));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_file, PathBuf::from("logs/run.log"));
    }

    #[test]
    fn unparsable_file_reports_its_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(output_dir: 42").unwrap();

        match HarvestConfig::load(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
