//! Project lifecycle status and the allowed transitions between statuses.
//!
//! Status values are stored as text in `projects.status`; the database CHECK
//! constraint lists the same strings as [`VALID_PROJECT_STATUSES`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_ASSIGNED: &str = "ASSIGNED";
pub const STATUS_REPORTED: &str = "REPORTED";
pub const STATUS_REMAINING_WORK: &str = "REMAINING_WORK";
pub const STATUS_COMPLETED: &str = "COMPLETED";

pub const VALID_PROJECT_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ASSIGNED,
    STATUS_REPORTED,
    STATUS_REMAINING_WORK,
    STATUS_COMPLETED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending,
    Assigned,
    Reported,
    RemainingWork,
    Completed,
}

impl ProjectStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_ASSIGNED => Ok(Self::Assigned),
            STATUS_REPORTED => Ok(Self::Reported),
            STATUS_REMAINING_WORK => Ok(Self::RemainingWork),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid project status '{s}'. Must be one of: {}",
                VALID_PROJECT_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Assigned => STATUS_ASSIGNED,
            Self::Reported => STATUS_REPORTED,
            Self::RemainingWork => STATUS_REMAINING_WORK,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Forward-only, except that a project in `RemainingWork` may receive
    /// further reports (staying in `RemainingWork` or moving to `Reported`).
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        use ProjectStatus::*;
        matches!(
            (self, next),
            (Pending, Assigned)
                | (Assigned, Reported)
                | (Assigned, RemainingWork)
                | (RemainingWork, Reported)
                | (RemainingWork, RemainingWork)
                | (Reported, Completed)
        )
    }

    /// Validate a transition, returning a descriptive error when rejected.
    pub fn ensure_transition(&self, next: ProjectStatus) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Project cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }

    /// Whether an engineer may submit a field report in this status.
    pub fn accepts_report(&self) -> bool {
        matches!(self, Self::Assigned | Self::RemainingWork)
    }
}
