//! Bounded-retry stream availability check
//!
//! Mirrors the retry behavior a player applies to a flaky live stream: an
//! attempt either succeeds, or schedules a retry with linear backoff until
//! the retry budget is spent.

use serde::Serialize;
use std::time::Duration;

use crate::config::ProbeConfig;

/// Retry policy: bounded attempts with linear backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt
    pub max_retries: u32,

    /// Backoff step; retry n waits n * step
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Build a policy from the probe configuration
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_step: Duration::from_secs(config.backoff_step_secs),
        }
    }

    /// Delay before retry `n` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_step * retry
    }
}

/// Probe state
///
/// `Loading` is the initial attempt, `Retrying(n)` the nth retry. `Up` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Loading,
    Retrying(u32),
    Up,
    Failed,
}

impl ProbeState {
    /// Next state after a successful attempt
    pub fn on_success(self) -> ProbeState {
        match self {
            ProbeState::Failed => ProbeState::Failed,
            _ => ProbeState::Up,
        }
    }

    /// Next state after a failed attempt
    pub fn on_failure(self, policy: &RetryPolicy) -> ProbeState {
        match self {
            ProbeState::Loading if policy.max_retries > 0 => ProbeState::Retrying(1),
            ProbeState::Loading => ProbeState::Failed,
            ProbeState::Retrying(n) if n < policy.max_retries => ProbeState::Retrying(n + 1),
            ProbeState::Retrying(_) => ProbeState::Failed,
            terminal => terminal,
        }
    }

    /// True for `Up` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProbeState::Up | ProbeState::Failed)
    }
}

/// Final probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Up,
    Failed,
}

/// Result of a completed probe run
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Final outcome
    pub status: ProbeStatus,

    /// Number of upstream attempts made
    pub attempts: u32,
}

/// Probe a stream URL, retrying per the policy
///
/// An attempt counts as successful when the upstream answers with a 2xx
/// status. Failed attempts sleep the backoff delay before the next try.
pub async fn probe_stream(
    client: &reqwest::Client,
    url: &url::Url,
    policy: RetryPolicy,
) -> ProbeReport {
    let mut state = ProbeState::Loading;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let ok = match client.get(url.as_str()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!("Probe attempt {} for {} failed: {}", attempts, url, err);
                false
            }
        };

        state = if ok {
            state.on_success()
        } else {
            state.on_failure(&policy)
        };

        match state {
            ProbeState::Up => {
                return ProbeReport {
                    status: ProbeStatus::Up,
                    attempts,
                }
            }
            ProbeState::Failed => {
                return ProbeReport {
                    status: ProbeStatus::Failed,
                    attempts,
                }
            }
            ProbeState::Retrying(n) => {
                tokio::time::sleep(policy.delay_for(n)).await;
            }
            ProbeState::Loading => unreachable!("transitions never return to Loading"),
        }
    }
}
