use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{ensure, Context};
use chrono::{DateTime, TimeDelta, Utc};
use portfolio_di::Build;
use portfolio_shared_contracts::{rate_limit::RateLimitService, time::TimeService};
use tracing::{debug, warn};

/// Number of tracked clients above which expired windows are pruned.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Build)]
pub struct RateLimitServiceImpl<Time> {
    time: Time,
    config: RateLimitServiceConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone, Default)]
pub struct RateLimitServiceConfig {
    /// `None` disables rate limiting.
    pub limit: Option<RateLimit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    max_requests: u32,
    window: TimeDelta,
}

impl RateLimit {
    pub fn new(max_requests: u32, window: Duration) -> anyhow::Result<Self> {
        ensure!(max_requests > 0, "max_requests must be at least 1");
        ensure!(!window.is_zero(), "window must not be empty");
        let window = TimeDelta::from_std(window).context("window is too large")?;
        Ok(Self {
            max_requests,
            window,
        })
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }
}

#[derive(Debug, Default)]
struct State {
    windows: Mutex<HashMap<IpAddr, Window>>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    start: DateTime<Utc>,
    count: u32,
}

impl<Time> RateLimitService for RateLimitServiceImpl<Time>
where
    Time: TimeService,
{
    fn check(&self, client: IpAddr) -> bool {
        let Some(limit) = self.config.limit else {
            return true;
        };

        let now = self.time.now();
        let expired = |window: &Window| now.signed_duration_since(window.start) >= limit.window;

        let mut windows = self
            .state
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() >= PRUNE_THRESHOLD {
            windows.retain(|_, window| !expired(window));
            debug!(tracked = windows.len(), "pruned expired rate limit windows");
        }

        let window = windows
            .entry(client)
            .and_modify(|window| {
                if expired(window) {
                    *window = Window {
                        start: now,
                        count: 0,
                    };
                }
            })
            .or_insert(Window {
                start: now,
                count: 0,
            });

        if window.count >= limit.max_requests {
            warn!(%client, "rate limit exceeded");
            return false;
        }

        window.count += 1;
        true
    }
}
