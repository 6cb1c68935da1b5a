//! Disclosure core: pure link, filename and run-summary helpers.
mod filename;
mod links;
mod outcome;
mod summary;
mod validate;

pub use filename::url_to_filename;
pub use links::{extract_pdf_urls, find_pdf_urls, remove_duplicates};
pub use outcome::{classify_content_type, DownloadOutcome, SavedKind};
pub use summary::{Phase, RunSummary};
pub use validate::is_url_valid;
