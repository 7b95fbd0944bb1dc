use regex::Regex;
use std::sync::LazyLock;

// Matches href attribute values in either quote style. Pattern scanning is
// deliberate: it tolerates malformed markup a structural parser would choke
// on, at the cost of false positives on exotic pages.
static HREF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href=["']([^"']*)["']"#).expect("hardcoded regex pattern is valid")
});

/// Gathers raw link values from a page body
///
/// Scans for `href` attributes and returns their values in document order.
/// Values starting with `#` point within the same page and are skipped
/// before normalization is ever attempted.
pub fn extract_links(body: &str) -> Vec<String> {
    HREF_PATTERN
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|href| !href.starts_with('#'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_document_order() {
        let body = r#"<a href="/first">1</a><p><a href="/second">2</a></p>"#;
        assert_eq!(extract_links(body), vec!["/first", "/second"]);
    }

    #[test]
    fn test_both_quote_styles() {
        let body = r#"<a href="/double">d</a><a href='/single'>s</a>"#;
        assert_eq!(extract_links(body), vec!["/double", "/single"]);
    }

    #[test]
    fn test_fragment_links_excluded() {
        let body = r##"<a href="#top">top</a><a href="/real">real</a><a href="#section-2">s</a>"##;
        assert_eq!(extract_links(body), vec!["/real"]);
    }

    #[test]
    fn test_tolerates_malformed_markup() {
        // Unclosed tags and stray brackets do not stop the scan
        let body = r#"<div <a href="/a"><a href="/b""#;
        assert_eq!(extract_links(body), vec!["/a", "/b"]);
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("<html><body>nothing here</body></html>").is_empty());
    }

    #[test]
    fn test_non_anchor_hrefs_are_harvested_too() {
        // <link href=...> is picked up as well; filtering decides its fate
        let body = r#"<link rel="stylesheet" href="/style.css">"#;
        assert_eq!(extract_links(body), vec!["/style.css"]);
    }
}
