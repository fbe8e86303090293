//! Timers and clocks that work on both web (WASM) and native targets.
//!
//! - **Native**: tokio timers, used by tests and any non-browser host
//! - **Web**: `gloo-timers`, backed by `setTimeout`

use std::time::Duration;

/// Suspends the current task for `duration`.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspends the current task for `duration`.
///
/// Web version: `setTimeout` based, millisecond resolution.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

/// Lets every other ready task run before continuing.
#[cfg(not(target_arch = "wasm32"))]
pub async fn yield_now() {
    tokio::task::yield_now().await;
}

/// Lets every other ready task run before continuing.
///
/// Web version: a zero-delay timeout, so the browser event loop gets a turn.
#[cfg(target_arch = "wasm32")]
pub async fn yield_now() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by `instant::Instant` (`performance.now()` on the web).
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: instant::Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_clock_is_monotonic() {
        let clock = InstantClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_waits_for_duration() {
        let start = tokio::time::Instant::now();
        sleep(Duration::from_secs(3)).await;
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}
