//! Per-connection input rate limiting.

use std::fmt;
use std::num::NonZeroU32;

use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use crate::error::GameError;

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket over inbound frames for one connection.
///
/// A rate of 0 disables limiting.
pub struct InputRateLimiter {
    limiter: Option<Limiter>,
    clock: DefaultClock,
}

impl InputRateLimiter {
    /// Creates a limiter allowing `per_second` frames per second, with a
    /// burst of the same size.
    #[must_use]
    pub fn new(per_second: u32) -> Self {
        let clock = DefaultClock::default();
        let limiter = NonZeroU32::new(per_second)
            .map(|rate| RateLimiter::direct_with_clock(Quota::per_second(rate), &clock));
        Self { limiter, clock }
    }

    /// Consumes one token.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RateLimited`] with the time until the next
    /// token when the bucket is empty.
    pub fn check(&self) -> Result<(), GameError> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };
        limiter.check().map_err(|not_until| {
            let wait = not_until.wait_time_from(self.clock.now());
            GameError::RateLimited {
                retry_after_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            }
        })
    }
}

impl fmt::Debug for InputRateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRateLimiter")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_a_full_burst_then_limits() {
        let limiter = InputRateLimiter::new(5);
        for _ in 0..5 {
            assert!(limiter.check().is_ok());
        }
        assert!(matches!(
            limiter.check(),
            Err(GameError::RateLimited { .. })
        ));
    }

    #[test]
    fn zero_disables_limiting() {
        let limiter = InputRateLimiter::new(0);
        for _ in 0..10_000 {
            assert!(limiter.check().is_ok());
        }
    }
}
