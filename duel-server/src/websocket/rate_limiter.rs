use std::time::{Duration, Instant};

/// Token bucket applied to each connection's inbound frames.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_rate: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::new_with_limits(30, Duration::from_millis(500))
    }

    pub fn new_with_limits(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    pub fn check_rate_limit(&mut self) -> bool {
        self.refill_tokens();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn refill_tokens(&mut self) {
        if self.refill_rate.is_zero() {
            self.tokens = self.max_tokens;
            return;
        }

        let elapsed = self.last_refill.elapsed();
        let intervals =
            u32::try_from(elapsed.as_nanos() / self.refill_rate.as_nanos()).unwrap_or(u32::MAX);

        if intervals > 0 {
            self.tokens = self.tokens.saturating_add(intervals).min(self.max_tokens);
            if self.tokens == self.max_tokens {
                self.last_refill = Instant::now();
            } else {
                self.last_refill += self.refill_rate * intervals;
            }
        }
    }

    pub fn remaining_tokens(&mut self) -> u32 {
        self.refill_tokens();
        self.tokens
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
