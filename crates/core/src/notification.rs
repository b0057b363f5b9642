//! Notification types, recipients, and message text.

use serde::{Deserialize, Serialize};

use crate::jst::jst_date;
use crate::types::{DbId, Timestamp};

pub const TYPE_PROJECT_ASSIGNED: &str = "PROJECT_ASSIGNED";
pub const TYPE_PROJECT_REPORTED: &str = "PROJECT_REPORTED";
pub const TYPE_PROJECT_COMPLETED: &str = "PROJECT_COMPLETED";
pub const TYPE_REPORT_OVERDUE: &str = "REPORT_OVERDUE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ProjectAssigned,
    ProjectReported,
    ProjectCompleted,
    ReportOverdue,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectAssigned => TYPE_PROJECT_ASSIGNED,
            Self::ProjectReported => TYPE_PROJECT_REPORTED,
            Self::ProjectCompleted => TYPE_PROJECT_COMPLETED,
            Self::ReportOverdue => TYPE_REPORT_OVERDUE,
        }
    }

    /// Short title shown in notification lists.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ProjectAssigned => "New project assigned",
            Self::ProjectReported => "Field report submitted",
            Self::ProjectCompleted => "Project completed",
            Self::ReportOverdue => "Field report overdue",
        }
    }

    /// Body text for a notification about project `project_number`.
    pub fn message(&self, project_number: &str) -> String {
        match self {
            Self::ProjectAssigned => {
                format!("Project {project_number} has been assigned to you.")
            }
            Self::ProjectReported => {
                format!("A field report was submitted for project {project_number}.")
            }
            Self::ProjectCompleted => {
                format!("Project {project_number} has been marked completed.")
            }
            Self::ReportOverdue => format!(
                "The work date for project {project_number} has passed and no report was submitted."
            ),
        }
    }
}

/// The single user a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Staff(DbId),
    Engineer(DbId),
}

impl Recipient {
    /// `(staff_user_id, engineer_id)` column pair; exactly one is `Some`.
    pub fn columns(&self) -> (Option<DbId>, Option<DbId>) {
        match *self {
            Self::Staff(id) => (Some(id), None),
            Self::Engineer(id) => (None, Some(id)),
        }
    }
}

/// Uniqueness key for the once-per-day overdue notification of a project.
pub fn overdue_dedup_key(project_id: DbId, now: Timestamp) -> String {
    format!("{TYPE_REPORT_OVERDUE}:{project_id}:{}", jst_date(now))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn recipient_sets_exactly_one_column() {
        assert_eq!(Recipient::Staff(3).columns(), (Some(3), None));
        assert_eq!(Recipient::Engineer(4).columns(), (None, Some(4)));
    }

    #[test]
    fn dedup_key_uses_jst_calendar_day() {
        // 20:00 UTC on the 18th is already the 19th in JST.
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).unwrap();
        assert_eq!(overdue_dedup_key(12, now), "REPORT_OVERDUE:12:2026-10-19");
    }

    #[test]
    fn dedup_key_is_stable_within_a_day() {
        let morning = Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2026, 10, 19, 14, 59, 59).unwrap();
        assert_eq!(overdue_dedup_key(1, morning), overdue_dedup_key(1, night));
    }

    #[test]
    fn message_mentions_project_number() {
        let msg = NotificationType::ReportOverdue.message("VX-2026-0001");
        assert!(msg.contains("VX-2026-0001"));
    }
}
