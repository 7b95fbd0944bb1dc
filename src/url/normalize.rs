use url::Url;

/// Normalizes a link found in a page so it can be requested directly
///
/// Links appear in three shapes, handled in order:
///
/// 1. Protocol-relative (`//cdn.example.com/x`): rebuilt with the scheme the
///    page itself was loaded over.
/// 2. Scheme-less (`/images`, `page.html`, `?sort=new`): resolved against the
///    URL of the page they were found on, per standard relative resolution.
/// 3. Anything else is already absolute and is returned unchanged.
///
/// # Arguments
///
/// * `raw` - The link value as it appeared in the page
/// * `base` - The URL the page was loaded from
///
/// # Returns
///
/// * `Some(String)` - An absolute URL ready for fetching
/// * `None` - The link cannot be parsed as a URL and is unusable
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wander::url::normalize_link;
///
/// let base = Url::parse("https://example.com/a/").unwrap();
/// assert_eq!(
///     normalize_link("/b", &base),
///     Some("https://example.com/b".to_string())
/// );
/// ```
pub fn normalize_link(raw: &str, base: &Url) -> Option<String> {
    // '//' means keep the protocol used to access the current page
    if let Some(rest) = raw.strip_prefix("//") {
        let reparsed = Url::parse(&format!("{}://{}", base.scheme(), rest)).ok()?;
        let host = reparsed.host_str()?;
        let authority = match reparsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        return Some(format!("{}://{}{}", base.scheme(), authority, reparsed.path()));
    }

    match Url::parse(raw) {
        // Already absolute
        Ok(_) => Some(raw.to_string()),
        // No scheme, so treat it as a reference relative to the page
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.join(raw).ok().map(|resolved| resolved.to_string())
        }
        // The parser can get confused by characters like ']' that break URL
        // syntax; such links are unusable rather than an error
        Err(_) => None,
    }
}
