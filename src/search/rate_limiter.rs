// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Minimum-interval rate limiting for scraping requests
//!
//! Search engines ban source addresses that hit them in quick succession.
//! Every provider call and every fast-path fetch in the process goes
//! through one shared limiter that keeps consecutive calls at least
//! `min_interval` apart.

use governor::clock::{Clock, DefaultClock, Reference};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(3000);

/// Rate limiter enforcing a minimum spacing between calls
///
/// Keeps the instant of the last granted call. A call that arrives less
/// than `min_interval` after it is delayed by the remainder; idle time is
/// never banked. The lock is held from the check until the new instant is
/// recorded, so two callers can never be granted the same slot.
pub struct SearchRateLimiter<C: Clock = DefaultClock> {
    last_call: Mutex<Option<C::Instant>>,
    clock: C,
    min_interval: Duration,
}

impl SearchRateLimiter<DefaultClock> {
    /// Create a new rate limiter on the real clock
    ///
    /// A zero interval falls back to the 3 second default.
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, DefaultClock::default())
    }
}

impl<C: Clock> SearchRateLimiter<C> {
    /// Create a rate limiter on an arbitrary (e.g. fake) clock
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        let min_interval = if min_interval.is_zero() {
            DEFAULT_MIN_INTERVAL
        } else {
            min_interval
        };

        Self {
            last_call: Mutex::new(None),
            clock,
            min_interval,
        }
    }

    /// Wait until the next call is allowed, then claim it
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(wait) = self.remaining(*last_call) {
            debug!("Rate limiter delaying next request by {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }

        *last_call = Some(self.clock.now());
    }

    /// Claim a slot without waiting
    ///
    /// Returns `None` when the call may proceed now (the slot is recorded),
    /// or the remaining wait otherwise (nothing is recorded). While another
    /// caller is inside [`acquire`](Self::acquire) the full interval is
    /// reported.
    pub fn try_acquire(&self) -> Option<Duration> {
        let mut last_call = match self.last_call.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Some(self.min_interval),
        };

        match self.remaining(*last_call) {
            Some(wait) => Some(wait),
            None => {
                *last_call = Some(self.clock.now());
                None
            }
        }
    }

    /// Get the configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    fn remaining(&self, last_call: Option<C::Instant>) -> Option<Duration> {
        let last_call = last_call?;
        let elapsed = Duration::from(self.clock.now().duration_since(last_call));
        self.min_interval
            .checked_sub(elapsed)
            .filter(|wait| !wait.is_zero())
    }
}
