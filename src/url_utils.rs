//! URL Utility Functions
//!
//! Resolution of relative URLs against the page URL and root-domain checks
//! used by the embed extractors.

use url::Url;

/// Check if a string is an absolute URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.host_str().is_some_and(|h| !h.is_empty()))
}

/// Convert a relative URL to absolute form.
///
/// Empty values, fragments, `data:` and `javascript:` URIs and URLs that are
/// already absolute are returned unchanged, as is everything when there is no
/// base URL.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The page URL, if known
#[must_use]
pub fn create_absolute_url(url_str: &str, base: Option<&Url>) -> String {
    let Some(base) = base else {
        return url_str.to_string();
    };

    if url_str.is_empty()
        || url_str.starts_with('#')
        || url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || is_absolute_url(url_str)
    {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Parse a URL, treating a protocol-relative `//host/...` as `http:`.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    if url_str.is_empty() {
        return None;
    }
    if url_str.starts_with("//") {
        return Url::parse(&format!("http:{url_str}")).ok();
    }
    Url::parse(url_str).ok()
}

/// Whether the URL's host is `root` or a subdomain of it
/// (`http://a.b.c/foo` has root domain `b.c`).
#[must_use]
pub fn has_root_domain(url_str: &str, root: &str) -> bool {
    if root.is_empty() {
        return false;
    }
    let Some(url) = parse_url(url_str) else {
        return false;
    };
    url.host_str()
        .is_some_and(|host| host == root || host.ends_with(&format!(".{root}")))
}

/// Last non-empty path segment of a URL.
#[must_use]
pub fn last_path_segment(url: &Url) -> Option<String> {
    url.path()
        .split('/')
        .map(str::trim)
        .rfind(|part| !part.is_empty())
        .map(str::to_string)
}
