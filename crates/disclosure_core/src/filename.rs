use url::Url;

const DEFAULT_EXTENSION: &str = ".pdf";

/// Deterministic, filesystem-safe filename for a document URL.
///
/// The lowercased basename of the URL path is reduced to `[a-z0-9_]`, a
/// redundant trailing `_pdf` is dropped and the original extension (or
/// `.pdf` when there is none) is appended. A URL whose path ends in `/`
/// yields the bare `.pdf`.
pub fn url_to_filename(raw_url: &str) -> String {
    let lower = raw_url.to_lowercase();
    let basename = path_basename(&lower);
    let extension = extension_of(&basename)
        .and_then(sanitize_extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let mut stem = sanitize_stem(&basename);
    if stem.ends_with("_pdf") {
        stem.truncate(stem.len() - 4);
    }

    // The stem holds no dots, so the extension is always appended.
    stem.push_str(&extension);
    stem
}

fn path_basename(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let last = path.rsplit('/').next().unwrap_or_default();
    // `;params` on the last segment are not part of the name.
    last.split(';').next().unwrap_or_default().to_string()
}

/// Extension including its dot; leading dots of the basename do not count.
fn extension_of(basename: &str) -> Option<&str> {
    let visible = basename.trim_start_matches('.');
    visible.rfind('.').map(|dot| &visible[dot..])
}

fn sanitize_extension(extension: &str) -> Option<String> {
    let kept: String = extension
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(format!(".{kept}"))
    }
}

fn sanitize_stem(basename: &str) -> String {
    let mut compacted = String::with_capacity(basename.len());
    let mut prev_underscore = false;
    for c in basename.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            compacted.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            compacted.push('_');
            prev_underscore = true;
        }
    }
    compacted.trim_matches('_').to_string()
}
