use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket rate limiter for API request throttling.
///
/// Tokens refill continuously based on elapsed time; `acquire` waits until
/// at least one token is available, then consumes it. Capacity equals the
/// refill rate, so short bursts up to one second's budget pass immediately.
pub struct TokenBucketRateLimiter {
    state: Mutex<BucketState>,
    capacity: f64,
    refill_rate: f64,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// Create a new rate limiter allowing `requests_per_second` sustained.
    pub fn new(requests_per_second: f64) -> Self {
        assert!(requests_per_second > 0.0, "rate limit must be positive");

        Self {
            state: Mutex::new(BucketState {
                tokens: requests_per_second,
                last_refill: Instant::now(),
            }),
            capacity: requests_per_second,
            refill_rate: requests_per_second,
        }
    }

    /// Wait for and consume one token.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;

                let elapsed = state.last_refill.elapsed().as_secs_f64();
                state.tokens = (state.tokens + elapsed * self.refill_rate).min(self.capacity);
                state.last_refill = Instant::now();

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }

                // Time until one full token is available
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_rate)
            };

            sleep(wait).await;
        }
    }
}
