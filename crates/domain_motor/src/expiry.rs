//! Periodic logging of freshly expired policies
//!
//! A policy counts as expired once the start of its last covered day (00:00
//! UTC) falls within the lookback window ending now. Each policy is reported
//! at most once per process; the record of reported policies is not persisted.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use core_kernel::{PolicyId, PortError};

use crate::policy::InsurancePolicy;
use crate::ports::MotorStorePort;

/// Timing of the expiry sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryConfig {
    /// Time between sweeps
    pub interval: Duration,
    /// How far back an expiry may lie and still be reported
    pub lookback: Duration,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10 * 60),
            lookback: Duration::from_secs(60 * 60),
        }
    }
}

/// One sweep's worth of state: the policies already reported
#[derive(Debug)]
pub struct ExpiredPolicySweep {
    lookback: chrono::Duration,
    reported: HashSet<PolicyId>,
}

impl ExpiredPolicySweep {
    pub fn new(lookback: Duration) -> Self {
        Self {
            lookback: chrono::Duration::from_std(lookback).unwrap_or(chrono::Duration::hours(1)),
            reported: HashSet::new(),
        }
    }

    /// Number of distinct policies reported so far
    pub fn reported_count(&self) -> usize {
        self.reported.len()
    }

    /// Logs and returns policies that expired within the lookback window and
    /// were not reported by an earlier call
    pub async fn sweep(
        &mut self,
        store: &dyn MotorStorePort,
        now: DateTime<Utc>,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let window_start = now - self.lookback;
        let candidates = store
            .policies_ending_between(window_start.date_naive(), now.date_naive())
            .await?;

        let mut expired = Vec::new();
        for policy in candidates {
            let expired_at = policy.window().end_instant();
            if expired_at < window_start || expired_at > now {
                continue;
            }
            if !self.reported.insert(policy.id) {
                continue;
            }
            info!(
                policy_id = %policy.id,
                car_id = %policy.car_id,
                end_date = %policy.end_date,
                "Policy {} expired at {}",
                policy.id,
                policy.end_date
            );
            expired.push(policy);
        }
        Ok(expired)
    }
}

/// Background task running [`ExpiredPolicySweep`] on a fixed cadence
pub struct ExpiryWorker {
    sweep: ExpiredPolicySweep,
    interval: Duration,
}

impl ExpiryWorker {
    pub fn new(config: ExpiryConfig) -> Self {
        Self {
            sweep: ExpiredPolicySweep::new(config.lookback),
            interval: config.interval,
        }
    }

    /// Runs until `shutdown` resolves
    ///
    /// The first sweep happens one interval after start. Sweep failures are
    /// logged and never end the loop.
    pub async fn run<F>(mut self, store: Arc<dyn MotorStorePort>, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        tokio::pin!(shutdown);

        info!(interval = ?self.interval, "Expiry worker started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(store.as_ref()).await;
                }
                _ = &mut shutdown => {
                    info!(reported = self.sweep.reported_count(), "Expiry worker stopped");
                    break;
                }
            }
        }
    }

    async fn tick(&mut self, store: &dyn MotorStorePort) {
        match self.sweep.sweep(store, Utc::now()).await {
            Ok(expired) => debug!(count = expired.len(), "Expiry sweep completed"),
            Err(e) => error!(error = %e, "Error occurred while checking expired policies"),
        }
    }
}
