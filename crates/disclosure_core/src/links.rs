use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Absolute product-sheet links of the form `.../pdf/?productID=<digits>`.
pub(crate) const PDF_LINK_PATTERN: &str = r#"https?://[^\s'"]+/pdf/\?productID=\d+"#;

static PDF_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PDF_LINK_PATTERN).expect("hardcoded regex pattern is valid"));

/// Every product-sheet link in `html`, in document order, duplicates included.
pub fn find_pdf_urls(html: &str) -> Vec<String> {
    PDF_LINK
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Unique product-sheet links in `html`, keeping first-seen order.
pub fn extract_pdf_urls(html: &str) -> Vec<String> {
    remove_duplicates(find_pdf_urls(html))
}

/// Drops repeated items while preserving the order of first occurrence.
pub fn remove_duplicates<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
