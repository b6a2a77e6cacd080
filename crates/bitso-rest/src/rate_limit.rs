//! Burst-rate protection for outbound requests
//!
//! A capacity-1 ticket pool: a request takes the ticket at dispatch and a
//! timer returns it after the configured interval. Spacing is measured from
//! dispatch, not from response arrival, so a slow response never extends the
//! throttle window beyond the interval.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

const TICKETS: usize = 1;

/// Capacity-1 rate limiter with timed ticket release
#[derive(Debug)]
pub struct TicketLimiter {
    tickets: Arc<Semaphore>,
    interval: RwLock<Duration>,
}

impl TicketLimiter {
    /// Create a limiter with the given burst interval
    ///
    /// A zero interval disables throttling entirely.
    pub fn new(interval: Duration) -> Self {
        Self {
            tickets: Arc::new(Semaphore::new(TICKETS)),
            interval: RwLock::new(interval),
        }
    }

    /// Create a disabled limiter
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The current burst interval
    pub fn interval(&self) -> Duration {
        *self.interval.read()
    }

    /// Change the burst interval
    ///
    /// Takes effect for the next `acquire`; a release timer already running
    /// keeps its original delay.
    pub fn set_interval(&self, interval: Duration) {
        *self.interval.write() = interval;
    }

    /// Take a ticket, waiting if none is available
    ///
    /// Returns immediately when the interval is zero. Otherwise the single
    /// ticket is consumed and handed back by a background timer after the
    /// interval elapses, independent of the request's completion.
    pub async fn acquire(&self) {
        let interval = self.interval();
        if interval.is_zero() {
            return;
        }

        let permit = self
            .tickets
            .acquire()
            .await
            .expect("ticket semaphore never closes");
        permit.forget();

        let tickets = Arc::clone(&self.tickets);
        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            tickets.add_permits(1);
        });
    }
}

impl Default for TicketLimiter {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_zero_interval_is_immediate() {
        let limiter = TicketLimiter::disabled();
        let start = Instant::now();
        for _ in 0..100 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_back_to_back_acquires_are_spaced() {
        let limiter = TicketLimiter::new(Duration::from_millis(100));

        limiter.acquire().await;
        let first_dispatch = Instant::now();
        limiter.acquire().await;

        assert!(first_dispatch.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_second_concurrent_caller_blocks() {
        let limiter = Arc::new(TicketLimiter::new(Duration::from_millis(80)));
        limiter.acquire().await;

        let contender = Arc::clone(&limiter);
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            contender.acquire().await;
            start.elapsed()
        });

        let waited = handle.await.unwrap();
        assert!(waited >= Duration::from_millis(70), "waited {:?}", waited);
    }

    #[tokio::test]
    async fn test_release_runs_from_dispatch_not_completion() {
        let limiter = TicketLimiter::new(Duration::from_millis(100));

        limiter.acquire().await;
        let dispatch = Instant::now();
        // Simulate a slow in-flight response; the release timer keeps running.
        tokio::time::sleep(Duration::from_millis(120)).await;

        let start = Instant::now();
        limiter.acquire().await;
        // The ticket was already back; no additional wait on top.
        assert!(start.elapsed() < Duration::from_millis(50));
        assert!(dispatch.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_interval_change_applies_to_next_acquire() {
        let limiter = TicketLimiter::disabled();
        assert_eq!(limiter.interval(), Duration::ZERO);

        limiter.set_interval(Duration::from_millis(40));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
