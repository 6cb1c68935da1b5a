use url::Url;

/// True when `candidate` parses as an absolute URL with both a scheme and a host.
pub fn is_url_valid(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}
