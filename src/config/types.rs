use serde::{Deserialize, Deserializer};

/// Main configuration structure for Wander
///
/// Loaded once at startup and owned by the engine for the whole session.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root URLs that each browsing cycle starts from
    pub root_urls: Vec<String>,

    /// Substrings of URLs that must never be visited
    #[serde(default)]
    pub blacklisted_urls: Vec<String>,

    /// Maximum number of links followed from a root before restarting
    pub max_depth: u32,

    /// Lower bound of the random delay between visits (seconds)
    pub min_sleep: u64,

    /// Upper bound of the random delay between visits (seconds, exclusive)
    pub max_sleep: u64,

    /// Session length in seconds; `false` or `null` disables the limit
    #[serde(default, deserialize_with = "deserialize_timeout")]
    pub timeout: Option<u64>,

    /// User agent strings rotated across requests
    pub user_agents: Vec<String>,
}

/// Accepts the `false` sentinel used by existing config files alongside a
/// plain number of seconds.
fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timeout {
        Disabled(bool),
        Seconds(u64),
    }

    match Option::<Timeout>::deserialize(deserializer)? {
        None | Some(Timeout::Disabled(false)) => Ok(None),
        Some(Timeout::Disabled(true)) => Err(serde::de::Error::custom(
            "timeout must be a number of seconds or false",
        )),
        Some(Timeout::Seconds(secs)) => Ok(Some(secs)),
    }
}
