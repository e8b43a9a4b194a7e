//! Retry executor for fallible async operations
//!
//! A failed attempt is retried after a delay chosen by a [`DelayStrategy`]
//! until the retry budget is spent. The total number of attempts is
//! `max_retries + 1`, and no delay follows the final failed attempt.

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Chooses how long to wait before the next attempt
///
/// `attempt` is the 1-based number of the attempt that just failed.
pub trait DelayStrategy: Send + Sync {
    fn delay(&self, attempt: u32) -> Duration;
}

/// Uniformly random delay in `[0, max_delay)`
#[derive(Debug, Clone, Copy)]
pub struct JitteredDelay {
    max_delay: Duration,
}

impl JitteredDelay {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }
}

impl Default for JitteredDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(10_000))
    }
}

impl DelayStrategy for JitteredDelay {
    fn delay(&self, _attempt: u32) -> Duration {
        let max_ms = self.max_delay.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }

        Duration::from_millis(rand::rng().random_range(0..max_ms))
    }
}

/// Retries immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayStrategy for NoDelay {
    fn delay(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

/// Runs `operation`, retrying on failure up to `max_retries` more times
///
/// # Returns
///
/// * `Ok(T)` - The first successful result, returned without delay
/// * `Err(E)` - The error of the last attempt once the budget is exhausted
pub async fn execute_with_retry<T, E, F, Fut>(
    mut operation: F,
    max_retries: u32,
    delay: &dyn DelayStrategy,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut remaining = max_retries;
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::info!("Retrying {} more times... ({})", remaining, e);
                if remaining == 0 {
                    tracing::warn!("Giving up after {} attempts: {}", attempt, e);
                    return Err(e);
                }

                let wait = delay.delay(attempt);
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
                remaining -= 1;
            }
        }
    }
}
