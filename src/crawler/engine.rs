//! Traversal engine - the randomized walk state machine
//!
//! This module contains the main browsing loop that coordinates all aspects
//! of traffic generation, including:
//! - Selecting a random root URL and building a frontier from it
//! - Walking the frontier at random to a bounded depth
//! - Replacing the frontier whenever a richer link set is discovered
//! - Retiring dead links into the blacklist
//! - Observing lifecycle stops between and during visits

use crate::config::Config;
use crate::crawler::extract::extract_links;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::lifecycle::{Lifecycle, StopReason};
use crate::url::{normalize_link, should_accept, Blacklist};
use crate::{ConfigError, Result, WanderError};
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// How one explore pass over a frontier ended
enum Walk {
    /// Frontier exhausted or depth bound hit; pick a new root
    DeadEnd,
    /// Cycle abandoned after an oversized response
    Aborted,
    /// Lifecycle stop observed
    Stopped(StopReason),
}

/// Result of a single cancellation-aware visit
enum Visit {
    /// The fetch completed with a classified outcome
    Outcome(FetchOutcome),
    /// An interrupt preempted or raced the fetch
    Interrupted,
}

/// The traversal engine
///
/// Owns the frontier and the blacklist for the whole session; nothing else
/// ever mutates them. The walk is fully sequential with one fetch in flight
/// at a time.
pub struct Engine {
    config: Config,
    client: Client,
    lifecycle: Lifecycle,
    frontier: Vec<String>,
    blacklist: Blacklist,
}

impl Engine {
    /// Creates an engine from a loaded configuration
    ///
    /// Records the session start time; the interrupt hook is installed when
    /// the run begins.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client()?;
        let lifecycle = Lifecycle::new(config.timeout.map(Duration::from_secs));
        let blacklist = Blacklist::from_seed(config.blacklisted_urls.clone());

        Ok(Self {
            config,
            client,
            lifecycle,
            frontier: Vec::new(),
            blacklist,
        })
    }

    /// Cancel handle for stopping the walk from outside, equivalent to an
    /// OS interrupt.
    pub fn stop_handle(&self) -> CancellationToken {
        self.lifecycle.handle()
    }

    /// Runs the walk until a lifecycle stop
    ///
    /// Cycles root selection and exploration indefinitely. Returns the stop
    /// reason on a clean stop; recoverable fetch trouble never ends the run,
    /// only unclassified errors do.
    pub async fn run(mut self) -> Result<StopReason> {
        self.lifecycle.install_interrupt_hook();

        let reason = self.browse().await?;
        tracing::info!("Exiting with reason: {}", reason);
        Ok(reason)
    }

    /// The root selection loop
    async fn browse(&mut self) -> Result<StopReason> {
        loop {
            let root = match self.config.root_urls.choose(&mut rand::thread_rng()) {
                Some(root) => root.clone(),
                None => {
                    return Err(WanderError::Config(ConfigError::Validation(
                        "no root URLs to browse".to_string(),
                    )))
                }
            };
            tracing::debug!("Selected root URL {}", root);

            match self.visit(&root).await? {
                Visit::Outcome(FetchOutcome::Fetched { body }) => {
                    self.frontier = self.collect_links(&body, &root);
                    tracing::debug!("Found {} links", self.frontier.len());

                    match self.explore().await? {
                        Walk::DeadEnd | Walk::Aborted => continue,
                        Walk::Stopped(reason) => return Ok(reason),
                    }
                }
                Visit::Outcome(FetchOutcome::DecodeFailed { error }) => {
                    tracing::warn!("Error decoding root URL {}: {}", root, error);
                    // A no-op unless the root happens to sit in the frontier,
                    // so roots stay eligible for future cycles
                    self.remove_and_blacklist(&root);
                }
                Visit::Outcome(FetchOutcome::TransportFailed { error }) => {
                    tracing::warn!("Error connecting to root URL {}: {}", root, error);
                }
                Visit::Outcome(FetchOutcome::TooLarge { size }) => {
                    tracing::warn!("Content at root URL {} is too large ({} bytes)", root, size);
                }
                Visit::Interrupted => return Ok(StopReason::Interrupt),
            }
        }
    }

    /// Walks the current frontier, one random link per iteration
    ///
    /// Each iteration re-checks the dead-end conditions and the lifecycle
    /// before visiting; the depth counter bounds the walk explicitly rather
    /// than relying on recursion.
    async fn explore(&mut self) -> Result<Walk> {
        let mut depth: u32 = 0;

        loop {
            if self.frontier.is_empty() || depth >= self.config.max_depth {
                tracing::debug!("Hit a dead end, moving to the next root URL");
                return Ok(Walk::DeadEnd);
            }

            if self.lifecycle.is_interrupted() {
                return Ok(Walk::Stopped(StopReason::Interrupt));
            }
            if self.lifecycle.is_timed_out() {
                return Ok(Walk::Stopped(StopReason::Timeout));
            }

            let link = match self.frontier.choose(&mut rand::thread_rng()) {
                Some(link) => link.clone(),
                None => return Ok(Walk::DeadEnd),
            };

            tokio::select! {
                _ = self.lifecycle.interrupted() => {
                    return Ok(Walk::Stopped(StopReason::Interrupt));
                }
                _ = jitter_sleep(self.config.min_sleep, self.config.max_sleep) => {}
            }

            tracing::info!("Visiting {}", link);
            match self.visit(&link).await? {
                Visit::Outcome(FetchOutcome::Fetched { body }) => {
                    let sub_links = self.collect_links(&body, &link);
                    if sub_links.len() > 1 {
                        // A richer frontier; the walk always follows the
                        // freshest link set, unvisited siblings included
                        self.frontier = sub_links;
                    } else {
                        tracing::debug!("Dead-end link {}, blacklisting it", link);
                        self.remove_and_blacklist(&link);
                    }
                }
                Visit::Outcome(
                    FetchOutcome::TransportFailed { error } | FetchOutcome::DecodeFailed { error },
                ) => {
                    tracing::debug!(
                        "Failed visiting {}: {}, removing from list and trying again",
                        link,
                        error
                    );
                    self.remove_and_blacklist(&link);
                }
                Visit::Outcome(FetchOutcome::TooLarge { size }) => {
                    tracing::warn!("Content at {} is too large ({} bytes)", link, size);
                    return Ok(Walk::Aborted);
                }
                Visit::Interrupted => return Ok(Walk::Stopped(StopReason::Interrupt)),
            }

            depth += 1;
        }
    }

    /// Fetches a URL while watching for an interrupt
    ///
    /// The interrupt can fire mid-fetch; the session timeout cannot, it is
    /// only polled at visit boundaries.
    async fn visit(&self, url: &str) -> Result<Visit> {
        tokio::select! {
            _ = self.lifecycle.interrupted() => Ok(Visit::Interrupted),
            outcome = fetch_url(&self.client, url, &self.config.user_agents) => {
                Ok(Visit::Outcome(outcome?))
            }
        }
    }

    /// Extracts, normalizes, and filters the links of a fetched page
    ///
    /// The returned set contains only links that passed the filter, which is
    /// the invariant the frontier relies on.
    fn collect_links(&self, body: &str, page_url: &str) -> Vec<String> {
        let base = match Url::parse(page_url) {
            Ok(base) => base,
            Err(_) => return Vec::new(),
        };

        extract_links(body)
            .into_iter()
            .filter_map(|raw| normalize_link(&raw, &base))
            .filter(|link| should_accept(link, &self.blacklist))
            .collect()
    }

    /// Removes a link from the frontier and permanently blacklists it
    ///
    /// No-op when the link is not part of the current frontier; calling it
    /// twice on the same link is the same as calling it once.
    fn remove_and_blacklist(&mut self, link: &str) {
        if let Some(index) = self.frontier.iter().position(|candidate| candidate == link) {
            self.frontier.remove(index);
            self.blacklist.insert(link.to_string());
        }
    }
}

/// Sleeps a random whole number of seconds drawn from [min, max).
async fn jitter_sleep(min: u64, max: u64) {
    let secs = if max > min {
        rand::thread_rng().gen_range(min..max)
    } else {
        min
    };
    tokio::time::sleep(Duration::from_secs(secs)).await;
}
