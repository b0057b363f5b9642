//! Daily sweep for assigned projects whose work date passed without a report.
//!
//! The sweep is normally triggered by an external scheduler through
//! `GET /api/cron/overdue-reports`. [`run`] drives the same sweep from an
//! in-process interval when `OVERDUE_SWEEP_INTERVAL_SECS` is set.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use vaxal_core::jst::today_start_utc;
use vaxal_core::notification::{
    overdue_dedup_key, NotificationType, Recipient, TYPE_REPORT_OVERDUE,
};
use vaxal_core::types::Timestamp;
use vaxal_db::repositories::{NotificationRepo, ProjectRepo};

use crate::notifications::dispatch;

/// Result of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Overdue candidates examined.
    pub checked: usize,
    /// `REPORT_OVERDUE` notifications inserted.
    pub created: usize,
}

/// Notify the engineer of every overdue project at most once per JST day.
///
/// A project is overdue when it is still `ASSIGNED` and its work date is
/// before the start of today (JST). The existence check skips projects that
/// were already notified today; the per-day `dedup_key` catches concurrent
/// sweeps that pass the check at the same time.
pub async fn sweep_overdue_reports(
    pool: &PgPool,
    now: Timestamp,
) -> Result<SweepSummary, sqlx::Error> {
    let today_start = today_start_utc(now);
    let candidates = ProjectRepo::find_overdue(pool, today_start).await?;

    let mut summary = SweepSummary {
        checked: candidates.len(),
        created: 0,
    };

    for project in &candidates {
        let Some(engineer_id) = project.engineer_id else {
            continue;
        };

        let already_notified = NotificationRepo::exists_for_project_since(
            pool,
            project.id,
            TYPE_REPORT_OVERDUE,
            today_start,
        )
        .await?;
        if already_notified {
            continue;
        }

        let mut conn = pool.acquire().await?;
        let created = dispatch(
            &mut conn,
            Recipient::Engineer(engineer_id),
            NotificationType::ReportOverdue,
            project,
            Some(overdue_dedup_key(project.id, now)),
        )
        .await?;
        if created.is_some() {
            summary.created += 1;
        }
    }

    tracing::info!(
        checked = summary.checked,
        created = summary.created,
        "Overdue report sweep finished"
    );
    Ok(summary)
}

/// Run the sweep every `interval` until `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Overdue report sweep loop started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Overdue report sweep loop stopping");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = sweep_overdue_reports(&pool, Utc::now()).await {
                    tracing::error!(error = %e, "Overdue report sweep failed");
                }
            }
        }
    }
}
