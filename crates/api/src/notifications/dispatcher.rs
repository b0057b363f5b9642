use sqlx::PgConnection;
use vaxal_core::notification::{NotificationType, Recipient};
use vaxal_db::models::notification::{NewNotification, Notification};
use vaxal_db::models::project::Project;
use vaxal_db::repositories::NotificationRepo;

/// Insert a `kind` notification about `project` for `recipient`.
///
/// Runs on the caller's connection so the row commits or rolls back with the
/// status change that caused it. Returns `None` when `dedup_key` was already
/// used.
pub async fn dispatch(
    conn: &mut PgConnection,
    recipient: Recipient,
    kind: NotificationType,
    project: &Project,
    dedup_key: Option<String>,
) -> Result<Option<Notification>, sqlx::Error> {
    let input = NewNotification {
        recipient,
        project_id: Some(project.id),
        kind,
        title: kind.title().to_string(),
        message: kind.message(&project.project_number),
        dedup_key,
    };

    let created = NotificationRepo::create(conn, &input).await?;
    match &created {
        Some(notification) => tracing::info!(
            notification_id = notification.id,
            project_id = project.id,
            kind = kind.as_str(),
            ?recipient,
            "Notification created"
        ),
        None => tracing::debug!(
            project_id = project.id,
            kind = kind.as_str(),
            "Notification skipped, dedup key already used"
        ),
    }
    Ok(created)
}
