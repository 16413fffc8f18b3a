//! Minimum-interval gate for outbound requests

use crate::config::MAX_DELAY_SECS;
use std::time::{Duration, Instant};

/// Longest interval a limiter will ever enforce
pub const MAX_DELAY: Duration = Duration::from_secs(MAX_DELAY_SECS);

/// Spaces successive calls to [`RateLimiter::wait`] at least `delay` apart
///
/// The first call returns immediately. Not meant to be shared between tasks;
/// the pipeline owns one limiter and awaits it in sequence.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum interval
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Creates a limiter from a delay in seconds
    ///
    /// Negative and NaN values mean no delay; anything above [`MAX_DELAY`]
    /// is clamped to it.
    pub fn from_secs_f64(delay: f64) -> Self {
        let delay = if delay.is_nan() {
            0.0
        } else {
            delay.clamp(0.0, MAX_DELAY.as_secs_f64())
        };
        Self::new(Duration::try_from_secs_f64(delay).unwrap_or(MAX_DELAY))
    }

    /// The current minimum interval
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Raises the interval to `delay` if it is longer than the current one
    ///
    /// Never raises it past [`MAX_DELAY`].
    pub fn widen_to(&mut self, delay: Duration) {
        let delay = if delay > MAX_DELAY {
            tracing::warn!(
                requested_secs = delay.as_secs_f64(),
                max_secs = MAX_DELAY.as_secs_f64(),
                "Requested delay above maximum, capping"
            );
            MAX_DELAY
        } else {
            delay
        };

        if delay > self.delay {
            tracing::info!(
                from_secs = self.delay.as_secs_f64(),
                to_secs = delay.as_secs_f64(),
                "Widening request delay"
            );
            self.delay = delay;
        }
    }

    /// Same as [`RateLimiter::widen_to`] for a delay in seconds from an
    /// untrusted source
    ///
    /// Values that are not a valid duration (negative, NaN, too large to
    /// represent) are logged and ignored.
    pub fn widen_to_secs(&mut self, delay: f64) {
        match Duration::try_from_secs_f64(delay) {
            Ok(delay) => self.widen_to(delay),
            Err(e) => {
                tracing::warn!(delay, error = %e, "Ignoring invalid delay");
            }
        }
    }

    /// Sleeps until `delay` has passed since the previous call
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                let sleep_for = self.delay - elapsed;
                tracing::debug!(
                    sleep_secs = sleep_for.as_secs_f64(),
                    "Rate limiting"
                );
                tokio::time::sleep(sleep_for).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}
