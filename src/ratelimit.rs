use std::{hash::Hash, num::NonZeroU32, time::Duration};

use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DashMapStateStore,
    Quota, RateLimiter,
};

#[derive(Debug, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed,
    Disallowed { retry_after: Duration },
}

/// Per-key connection rate limiter.
pub struct KeyedRateLimiter<K: Hash + Eq + Clone> {
    limiter: RateLimiter<K, DashMapStateStore<K>, DefaultClock>,
    cooldown: Duration,
}

impl<K> KeyedRateLimiter<K>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    /// `per_second` of 0 is treated as 1.
    pub fn new(per_second: u32, cooldown: Duration) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
        Self {
            limiter: RateLimiter::keyed(quota),
            cooldown,
        }
    }

    pub fn check(&self, key: &K) -> RateLimitResult {
        match self.limiter.check_key(key) {
            Ok(_) => RateLimitResult::Allowed,
            Err(negative) => {
                let wait = negative.wait_time_from(DefaultClock::default().now());
                RateLimitResult::Disallowed {
                    retry_after: wait.max(self.cooldown),
                }
            }
        }
    }
}
