//! Session lifecycle management
//!
//! This module tracks a single browsing session:
//! - Records the session start time exactly once
//! - Answers whether the configured timeout has elapsed
//! - Converts an OS interrupt into a cooperative cancellation token that the
//!   engine can observe between visits and while a fetch is in flight

use std::fmt;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Why the engine stopped
///
/// A stop is a designed termination path, not an error. The reason is logged
/// on exit and returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An external interrupt (ctrl-c) was received
    Interrupt,
    /// The configured session timeout elapsed
    Timeout,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Interrupt => write!(f, "interrupt received"),
            StopReason::Timeout => write!(f, "timeout reached"),
        }
    }
}

/// Tracks the lifetime of one browsing session
pub struct Lifecycle {
    started_at: Instant,
    timeout: Option<Duration>,
    token: CancellationToken,
}

impl Lifecycle {
    /// Starts the session clock. `None` disables the timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            started_at: Instant::now(),
            timeout,
            token: CancellationToken::new(),
        }
    }

    /// Installs the OS interrupt hook
    ///
    /// Spawned once per run. The hook cancels the session token, which is
    /// observable even while a fetch is in flight; there is no other global
    /// state involved.
    pub fn install_interrupt_hook(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    /// Clone of the cancellation token, for stopping the session from
    /// outside the engine.
    pub fn handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// True once an interrupt has been received.
    pub fn is_interrupted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves when an interrupt is received.
    pub async fn interrupted(&self) {
        self.token.cancelled().await;
    }

    /// True once the configured timeout has elapsed
    ///
    /// Always false when no timeout is configured. The check is polled at
    /// visit boundaries; it never preempts an in-flight fetch.
    pub fn is_timed_out(&self) -> bool {
        self.is_timed_out_at(Instant::now())
    }

    fn is_timed_out_at(&self, now: Instant) -> bool {
        match self.timeout {
            Some(timeout) => now.duration_since(self.started_at) >= timeout,
            None => false,
        }
    }
}
