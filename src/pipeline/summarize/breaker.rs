//! Circuit breaker guarding the remote inference API.
//!
//! Closed → (failure) → Open → (retry interval elapsed) → HalfOpen.
//! A half-open breaker lets exactly one probe through; its outcome
//! closes or re-opens the breaker.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Time source, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakerState {
    Closed,
    Open { since: Instant },
    HalfOpen,
}

/// Snapshot for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerStatus {
    Closed,
    Open,
    HalfOpen,
}

pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    retry_after: Duration,
    clock: Arc<dyn Clock>,
}

impl CircuitBreaker {
    pub fn new(retry_after: Duration) -> Self {
        Self::with_clock(retry_after, Arc::new(SystemClock))
    }

    pub fn with_clock(retry_after: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(BreakerState::Closed),
            retry_after,
            clock,
        }
    }

    // The state is a plain enum, always valid, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether a remote call may be attempted now. Moves an expired open
    /// breaker to half-open and admits the caller as the probe.
    pub fn allow_request(&self) -> bool {
        let mut state = self.lock();
        match *state {
            BreakerState::Closed => true,
            BreakerState::HalfOpen => false,
            BreakerState::Open { since } => {
                if self.clock.now().duration_since(since) >= self.retry_after {
                    *state = BreakerState::HalfOpen;
                    tracing::info!("Remote inference breaker half-open, probing");
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut state = self.lock();
        if *state != BreakerState::Closed {
            tracing::info!("Remote inference breaker closed");
        }
        *state = BreakerState::Closed;
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        if !matches!(*state, BreakerState::Open { .. }) {
            tracing::warn!(
                retry_after_secs = self.retry_after.as_secs(),
                "Remote inference breaker opened"
            );
        }
        *state = BreakerState::Open {
            since: self.clock.now(),
        };
    }

    pub fn status(&self) -> BreakerStatus {
        match *self.lock() {
            BreakerState::Closed => BreakerStatus::Closed,
            BreakerState::Open { .. } => BreakerStatus::Open,
            BreakerState::HalfOpen => BreakerStatus::HalfOpen,
        }
    }
}
