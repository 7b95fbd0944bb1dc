//! Crawler module for randomized web walking
//!
//! This module contains the traffic generation logic, including:
//! - HTTP fetching with identity rotation and failure classification
//! - Pattern-based link extraction
//! - The traversal engine that drives the random walk

mod engine;
mod extract;
mod fetcher;

pub use engine::Engine;
pub use extract::extract_links;
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};

use crate::config::Config;
use crate::lifecycle::StopReason;
use crate::Result;

/// Runs a complete browsing session
///
/// This is the main entry point for generating traffic. It will:
/// 1. Build the HTTP client and start the session clock
/// 2. Install the interrupt hook
/// 3. Walk random links from random roots until timeout or interrupt
///
/// # Arguments
///
/// * `config` - The loaded session configuration
///
/// # Returns
///
/// * `Ok(StopReason)` - The session stopped cleanly
/// * `Err(WanderError)` - An unrecoverable error ended the session
pub async fn wander(config: Config) -> Result<StopReason> {
    Engine::new(config)?.run().await
}
