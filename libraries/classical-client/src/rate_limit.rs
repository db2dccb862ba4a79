//! Leaky-bucket rate limiter
//!
//! Tokens refill one per `period / capacity`. [`RateLimiter::on_response`]
//! re-anchors the refill clock to the moment a response arrived, so a slow
//! server pushes the next slot back instead of letting requests pile up.

use crate::error::RateLimitError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug)]
struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

/// Token bucket shared by every request of one client.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    interval: Duration,
    state: Mutex<BucketState>,
}

impl RateLimiter {
    /// Allow `capacity` requests per `period`, starting with a full bucket
    pub fn new(capacity: u32, period: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            interval: period / capacity,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Allow `capacity` requests per minute
    pub fn per_minute(capacity: u32) -> Self {
        Self::new(capacity, Duration::from_secs(60))
    }

    /// Time between two refilled tokens
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tokens currently available
    pub fn available(&self) -> u32 {
        let mut state = self.lock();
        self.refill(&mut state, Instant::now());
        state.tokens
    }

    /// Take a token, sleeping until one is available or `cancel` fires
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), RateLimitError> {
        loop {
            if cancel.is_cancelled() {
                return Err(RateLimitError::Cancelled);
            }

            let delay = {
                let mut state = self.lock();
                let now = Instant::now();
                self.refill(&mut state, now);
                if state.tokens > 0 {
                    state.tokens -= 1;
                    return Ok(());
                }
                self.interval
                    .saturating_sub(now.saturating_duration_since(state.last_refill))
            };

            debug!(delay_ms = delay.as_millis() as u64, "Rate limited, waiting");
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RateLimitError::Cancelled),
                () = sleep(delay) => {}
            }
        }
    }

    /// Anchor the refill clock to now
    pub fn on_response(&self) {
        self.lock().last_refill = Instant::now();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BucketState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        let elapsed = now.saturating_duration_since(state.last_refill);
        let intervals = elapsed.as_nanos() / self.interval.as_nanos().max(1);
        if intervals == 0 {
            return;
        }

        let intervals = u32::try_from(intervals).unwrap_or(u32::MAX);
        state.tokens = state.tokens.saturating_add(intervals).min(self.capacity);
        state.last_refill += self.interval * intervals.min(self.capacity);
        if intervals > self.capacity {
            state.last_refill = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn full_bucket_does_not_wait() {
        let limiter = RateLimiter::new(3, Duration::from_secs(3));
        let cancel = CancellationToken::new();
        let start = Instant::now();

        for _ in 0..3 {
            limiter.wait(&cancel).await.unwrap();
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_bucket_waits_one_interval() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1));
        let cancel = CancellationToken::new();
        let start = Instant::now();

        limiter.wait(&cancel).await.unwrap();
        limiter.wait(&cancel).await.unwrap();
        limiter.wait(&cancel).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn response_anchors_next_refill() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        let cancel = CancellationToken::new();
        let start = Instant::now();

        limiter.wait(&cancel).await.unwrap();
        tokio::time::advance(Duration::from_millis(700)).await;
        limiter.on_response();
        limiter.wait(&cancel).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(1700));
    }

    #[tokio::test(start_paused = true)]
    async fn refill_is_capped_at_capacity() {
        let limiter = RateLimiter::new(2, Duration::from_secs(2));
        let cancel = CancellationToken::new();
        limiter.wait(&cancel).await.unwrap();
        limiter.wait(&cancel).await.unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(limiter.available(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_wait() {
        let limiter = RateLimiter::per_minute(1);
        let cancel = CancellationToken::new();
        limiter.wait(&cancel).await.unwrap();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        assert_eq!(limiter.wait(&cancel).await, Err(RateLimitError::Cancelled));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn cancelled_token_fails_fast() {
        let limiter = RateLimiter::per_minute(10);
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(limiter.wait(&cancel).await, Err(RateLimitError::Cancelled));
    }
}
