//! Waiting for a page snapshot to reach a usable state.
//!
//! The export core never waits; callers that watch a page which is still
//! rendering poll a predicate here under an explicit [`RetryPolicy`].

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// How many times to check, and how long to sleep between checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: delay.as_millis() as u64,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Call `check` until it returns `Some`, sleeping between attempts.
///
/// `check` receives the 1-based attempt number. Fails with
/// [`ExportError::NotReady`] once the policy's attempts are used up.
pub async fn wait_for<T, F>(policy: &RetryPolicy, mut check: F) -> Result<T>
where
    F: FnMut(u32) -> Option<T>,
{
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
        if let Some(ready) = check(attempt) {
            debug!("ready after {attempt} attempt(s)");
            return Ok(ready);
        }
        if attempt < attempts {
            debug!("not ready (attempt {attempt}/{attempts}), retrying in {:?}", policy.delay());
            tokio::time::sleep(policy.delay()).await;
        }
    }

    Err(ExportError::NotReady { attempts })
}
