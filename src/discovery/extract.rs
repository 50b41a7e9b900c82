use memchr::memmem;
use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::core::constants::scanning;

/// `http` or `https`, `://`, then at least one ASCII word character or one
/// of `.:/%~_-+`.
const URL_PATTERN: &str = r"(?-u)https?://[\w.:/%~_\-+]+";

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_PATTERN).expect("Failed to compile URL regex pattern"));

/// Returns true if `content` could contain a URL at all.
///
/// SIMD-backed substring search, used to skip the regex for the bulk of
/// files that never mention `http`.
pub fn may_contain_url(content: &[u8]) -> bool {
    memmem::find(content, scanning::URL_PREFILTER).is_some()
}

/// Iterate over every URL-shaped substring of `content`, left to right.
///
/// Matches are greedy and never overlap. Content is treated as raw bytes, so
/// binary files are scanned too.
pub fn find_urls(content: &[u8]) -> impl Iterator<Item = String> + '_ {
    let candidates = if may_contain_url(content) {
        Some(URL_REGEX.find_iter(content))
    } else {
        None
    };

    candidates
        .into_iter()
        .flatten()
        .map(|found| String::from_utf8_lossy(found.as_bytes()).into_owned())
}
