use url::Url;

/// Permanent rejection set for links that must not be visited
///
/// Seeded from the configuration and grown during the run as dead links are
/// retired. Entries are matched by substring containment against candidate
/// links, so a single entry like `iana.org` blocks a whole domain. The set
/// only ever grows; nothing is removed during a run.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: Vec<String>,
}

impl Blacklist {
    /// Creates a blacklist pre-populated with the configured entries.
    pub fn from_seed(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Permanently adds a link to the blacklist.
    pub fn insert(&mut self, link: String) {
        self.entries.push(link);
    }

    /// Returns true if any blacklist entry is contained in the URL.
    pub fn matches(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| url.contains(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validity predicate for normalized links
///
/// A link is valid when it parses as a URL with an http or https scheme and
/// a host. Everything else, including `mailto:` and `javascript:` links that
/// pass through normalization untouched, is rejected here.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

/// Decides whether a normalized link may enter the frontier.
///
/// Accepts a link iff it is non-empty, valid, and not blacklisted.
pub fn should_accept(url: &str, blacklist: &Blacklist) -> bool {
    !url.is_empty() && is_valid_url(url) && !blacklist.matches(url)
}
