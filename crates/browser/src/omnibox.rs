//! Address bar input handling.
//!
//! Decides whether free text typed into the address bar is a location or a
//! search query. The rules are a heuristic rather than a URL grammar: anything
//! containing a `.` is treated as a host, so `file.txt` navigates to
//! `https://file.txt`.

use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const HOME_URL: &str = "adapta://home";
pub(crate) const HOME_FILE_NAME: &str = "adapta_home.html";

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|_| unreachable!("domain pattern is a valid regex"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmniboxInput {
    /// Text that already names a scheme and is loaded as typed.
    Url(String),
    /// Text that looks like a host; loaded over https.
    Domain(String),
    SearchQuery(String),
}

impl OmniboxInput {
    pub fn classify(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if has_explicit_scheme(text) {
            return Some(Self::Url(text.to_string()));
        }

        if looks_like_domain(text) {
            return Some(Self::Domain(text.to_string()));
        }

        Some(Self::SearchQuery(text.to_string()))
    }

    pub fn to_url(&self, search_url: &str) -> String {
        match self {
            OmniboxInput::Url(url) => url.clone(),
            OmniboxInput::Domain(domain) => format!("https://{domain}"),
            OmniboxInput::SearchQuery(query) => {
                format!("{search_url}{}", query.replace(' ', "+"))
            }
        }
    }
}

/// Turns address bar text into the url to load, or `None` for blank input.
pub fn text_to_url(text: &str, search_url: &str) -> Option<String> {
    OmniboxInput::classify(text).map(|input| input.to_url(search_url))
}

fn has_explicit_scheme(input: &str) -> bool {
    if input.starts_with("http://") || input.starts_with("https://") {
        return true;
    }

    if let Some((scheme, _)) = input.split_once("://") {
        return is_scheme(scheme);
    }

    ["about:", "file:", "data:"]
        .iter()
        .any(|prefix| input.starts_with(prefix))
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn looks_like_domain(input: &str) -> bool {
    DOMAIN_PATTERN.is_match(input) || input.contains("localhost") || input.contains('.')
}

/// Whether `url` points at the synthesized home page.
pub fn is_home_url(url: &str) -> bool {
    url == HOME_URL || url.contains(HOME_FILE_NAME)
}

/// What the address bar shows for a loaded location.
pub fn display_url(url: &str) -> String {
    if is_home_url(url) {
        return HOME_URL.to_string();
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_for(text: &str) -> Option<String> {
        text_to_url(text, DEFAULT_SEARCH_URL)
    }

    #[test]
    fn blank_input_does_not_navigate() {
        assert_eq!(url_for(""), None);
        assert_eq!(url_for("   \t "), None);
    }

    #[test]
    fn explicit_schemes_are_kept_verbatim() {
        for input in [
            "https://github.com",
            "http://localhost:8080/path?q=a b",
            "ftp://mirror.example.org",
            "file:///tmp/index.html",
            "about:blank",
        ] {
            assert_eq!(url_for(input).as_deref(), Some(input));
        }
    }

    #[test]
    fn domains_are_prefixed_with_https_once() {
        assert_eq!(url_for("github.com").as_deref(), Some("https://github.com"));
        assert_eq!(
            url_for("  docs.rs/regex  ").as_deref(),
            Some("https://docs.rs/regex")
        );
        assert_eq!(url_for("localhost:3000").as_deref(), Some("https://localhost:3000"));
        assert_eq!(url_for("localhost").as_deref(), Some("https://localhost"));
    }

    #[test]
    fn dotted_words_are_treated_as_hosts() {
        assert_eq!(
            OmniboxInput::classify("file.txt"),
            Some(OmniboxInput::Domain("file.txt".into()))
        );
    }

    #[test]
    fn plain_queries_still_search() {
        assert_eq!(
            url_for("cats").as_deref(),
            Some("https://www.google.com/search?q=cats")
        );
        assert_eq!(
            url_for("rust ownership rules").as_deref(),
            Some("https://www.google.com/search?q=rust+ownership+rules")
        );
    }

    #[test]
    fn custom_search_engine_is_used_for_queries() {
        assert_eq!(
            text_to_url("rust lang", "https://duckduckgo.com/?q=").as_deref(),
            Some("https://duckduckgo.com/?q=rust+lang")
        );
    }

    #[test]
    fn not_every_colon_is_a_scheme() {
        assert_eq!(
            OmniboxInput::classify("1 + 1 = ://"),
            Some(OmniboxInput::SearchQuery("1 + 1 = ://".into()))
        );
    }

    #[test]
    fn home_page_is_displayed_by_alias() {
        assert_eq!(display_url("file:///tmp/adapta_home.html"), HOME_URL);
        assert_eq!(display_url("https://example.com"), "https://example.com");
        assert!(is_home_url(HOME_URL));
    }
}
