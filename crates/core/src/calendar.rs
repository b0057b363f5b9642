//! Engineer calendar event rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Engineer-declared availability; editable by its owner.
pub const EVENT_AVAILABLE: &str = "AVAILABLE";
/// System-generated booking created on assignment; read-only to engineers.
pub const EVENT_CONFIRMED: &str = "CONFIRMED";

/// Longest span a single availability block may cover.
pub const MAX_EVENT_DAYS: i64 = 31;

/// Validate that an event range is non-empty and not absurdly long.
pub fn validate_range(start_at: Timestamp, end_at: Timestamp) -> Result<(), CoreError> {
    if end_at <= start_at {
        return Err(CoreError::Validation(
            "end_at must be later than start_at".into(),
        ));
    }
    if end_at - start_at > chrono::Duration::days(MAX_EVENT_DAYS) {
        return Err(CoreError::Validation(format!(
            "An event may span at most {MAX_EVENT_DAYS} days"
        )));
    }
    Ok(())
}

/// Reject engineer edits to anything but their own availability blocks.
pub fn ensure_engineer_editable(status: &str) -> Result<(), CoreError> {
    if status == EVENT_CONFIRMED {
        return Err(CoreError::Forbidden(
            "Confirmed bookings cannot be changed".into(),
        ));
    }
    Ok(())
}
