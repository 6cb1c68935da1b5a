//! Disclosure engine: fetching, redirect resolution, downloads and the run pipeline.
mod download;
mod fetch;
mod persist;
mod pipeline;
mod resolve;
mod types;

pub use download::{DownloadSettings, PdfDownloader};
pub use fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use persist::{
    ensure_output_dir, file_exists, CommitOutcome, PersistError, StreamingFileWriter,
};
pub use pipeline::Pipeline;
pub use resolve::{BrowserResolver, BrowserSettings, RedirectResolver};
pub use types::{DownloadError, FailureKind, FetchError, ResolveError};
