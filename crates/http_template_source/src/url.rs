use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static URL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://\w").expect("static regex"));

/// `http:/` followed by anything but a second slash.
static HALF_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http:/([^/])").expect("static regex"));

/// True when `path` starts with `http://` or `https://` (any case) followed
/// by at least one word character.
pub fn is_url(path: &str) -> bool {
    URL_PREFIX.is_match(path)
}

/// Repair a collapsed scheme separator: `http:/example.com` becomes
/// `http://example.com`. Only the first occurrence is touched.
pub fn fix_scheme(path: &str) -> Cow<'_, str> {
    HALF_SCHEME.replacen(path, 1, "http://$1")
}

/// Keep only URL-shaped entries, preserving order.
pub fn filter_urls<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|p| is_url(p))
        .collect()
}
