//! Expiry sweeper
//!
//! Daily batch that moves stale invitations and approval requests to
//! `expired`. Each batch is applied atomically by the record store; a failed
//! batch is logged and reported, never retried within the same run.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use scheduler_common::SweeperConfig;
use scheduler_core::value_objects::RecordId;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use super::approval::ApprovalService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Counts from one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub invitations_expired: u64,
    pub approval_requests_expired: u64,
}

impl SweepReport {
    pub fn total(&self) -> u64 {
        self.invitations_expired + self.approval_requests_expired
    }
}

/// When the sweeper runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedule {
    /// Hour of day, UTC
    pub run_at_hour: u32,
    /// Sweep once and return
    pub run_once: bool,
}

impl SweepSchedule {
    /// 08:00 UTC, midnight US Pacific
    pub const DEFAULT_HOUR: u32 = 8;

    pub fn daily_at(run_at_hour: u32) -> Self {
        Self {
            run_at_hour: run_at_hour.min(23),
            run_once: false,
        }
    }

    /// First run strictly after `now`
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let at = NaiveTime::from_hms_opt(self.run_at_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        let today = now.date_naive().and_time(at).and_utc();
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

impl Default for SweepSchedule {
    fn default() -> Self {
        Self::daily_at(Self::DEFAULT_HOUR)
    }
}

impl From<&SweeperConfig> for SweepSchedule {
    fn from(config: &SweeperConfig) -> Self {
        Self {
            run_at_hour: config.run_at_hour.min(23),
            run_once: config.run_once,
        }
    }
}

/// Expiry sweeper
pub struct ExpirySweeper {
    ctx: ServiceContext,
}

impl ExpirySweeper {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Expire everything whose `expires_at` is before `now`.
    ///
    /// Both batches are attempted even if the first fails; the first error
    /// is returned after the second has run.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> ServiceResult<SweepReport> {
        let mut report = SweepReport::default();
        let mut first_error: Option<ServiceError> = None;

        match self.ctx.invitation_repo().expire_stale(now).await {
            Ok(count) => report.invitations_expired = count,
            Err(e) => {
                error!(error = %e, "Failed to expire invitations");
                first_error.get_or_insert(e.into());
            }
        }

        let mut affected_parents = BTreeSet::new();
        match self.ctx.approval_request_repo().expire_stale(now).await {
            Ok(expired) => {
                report.approval_requests_expired = expired.len() as u64;
                affected_parents.extend(expired.into_iter().map(|r| r.parent_id));
            }
            Err(e) => {
                error!(error = %e, "Failed to expire approval requests");
                first_error.get_or_insert(e.into());
            }
        }

        self.refresh_badges(&affected_parents).await;

        info!(
            invitations_expired = report.invitations_expired,
            approval_requests_expired = report.approval_requests_expired,
            "Expiry sweep finished"
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Sweep on `schedule` until `shutdown` resolves
    pub async fn run<F>(&self, schedule: SweepSchedule, shutdown: F) -> ServiceResult<()>
    where
        F: Future<Output = ()>,
    {
        if schedule.run_once {
            self.sweep_expired(self.ctx.now()).await?;
            return Ok(());
        }

        tokio::pin!(shutdown);
        info!(run_at_hour = schedule.run_at_hour, "Expiry sweeper started");

        loop {
            let now = self.ctx.now();
            let next = schedule.next_run_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_run = %next, "Next expiry sweep scheduled");

            tokio::select! {
                () = tokio::time::sleep(wait) => {
                    // Errors are already logged; the next day's run retries.
                    let _ = self.sweep_expired(self.ctx.now()).await;
                }
                () = &mut shutdown => {
                    info!("Expiry sweeper stopping");
                    return Ok(());
                }
            }
        }
    }

    async fn refresh_badges(&self, parents: &BTreeSet<RecordId>) {
        let approvals = ApprovalService::new(&self.ctx);
        for parent_id in parents {
            if let Err(e) = approvals.refresh_badge_count(parent_id).await {
                warn!(parent_id = %parent_id, error = %e, "Failed to refresh badge count");
            }
        }
    }
}
