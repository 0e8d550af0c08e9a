#![forbid(unsafe_code)]

//! Page context sent with every chat request, derived from the host page's
//! location and title.

use serde::{Deserialize, Serialize};

/// Where the conversation is happening.
///
/// `page_name` is a short identifier ("home" or a page stem); `paper_date` is
/// populated for daily-paper subpages so the server can scope its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: String,
    pub pathname: String,
    pub title: String,
    pub page_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paper_date: Option<String>,
}

impl PageInfo {
    /// Derive page context from the raw location parts.
    ///
    /// A path like `/dailies/pages/2026-02-13.html` names the page after its
    /// date and sets `paper_date`; other `/pages/` files use the file stem;
    /// the root and `index.html` are "home". When the path carries no date,
    /// a `YYYY-MM-DD` anywhere in the title is used as a fallback.
    #[must_use]
    pub fn extract(url: &str, pathname: &str, title: &str) -> Self {
        let mut page_name = "home".to_owned();
        let mut paper_date = None;

        if pathname.contains("/pages/") {
            if let Some(date) = dated_page_stem(pathname) {
                page_name = date.to_owned();
                paper_date = Some(date.to_owned());
            } else if let Some(stem) = page_stem(pathname) {
                page_name = stem.to_owned();
            }
        }

        if paper_date.is_none() {
            paper_date = find_date(title).map(str::to_owned);
        }

        Self {
            url: url.to_owned(),
            pathname: pathname.to_owned(),
            title: title.to_owned(),
            page_name,
            paper_date,
        }
    }
}

/// The date stem of a `/pages/YYYY-MM-DD.html` path, if any.
fn dated_page_stem(pathname: &str) -> Option<&str> {
    for (idx, _) in pathname.match_indices("/pages/") {
        let rest = &pathname[idx + "/pages/".len()..];
        if let Some(stem) = rest.strip_suffix(".html") {
            if is_date(stem) {
                return Some(stem);
            }
        }
    }
    None
}

/// The file stem of a `/pages/<file>.html` path, if any.
fn page_stem(pathname: &str) -> Option<&str> {
    for (idx, _) in pathname.match_indices("/pages/") {
        let rest = &pathname[idx + "/pages/".len()..];
        if let Some(stem) = rest.strip_suffix(".html") {
            if !stem.is_empty() && !stem.contains('/') {
                return Some(stem);
            }
        }
    }
    None
}

/// Whether `s` is exactly `YYYY-MM-DD` shaped. Shape only; no calendar
/// validation, matching what the server accepts.
fn is_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// First `YYYY-MM-DD` substring of `s`, if any.
fn find_date(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    for i in 0..bytes.len().saturating_sub(9) {
        // The window is pure ASCII when it matches, so slicing the str at
        // these byte offsets is safe.
        if let Ok(window) = std::str::from_utf8(&bytes[i..i + 10]) {
            if is_date(window) {
                return Some(&s[i..i + 10]);
            }
        }
    }
    None
}
