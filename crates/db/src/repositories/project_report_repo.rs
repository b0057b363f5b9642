//! Repository for the `project_reports` table.

use sqlx::{PgConnection, PgPool};
use vaxal_core::types::DbId;

use crate::models::project_report::{CreateProjectReport, ProjectReport};

const COLUMNS: &str =
    "id, project_id, engineer_id, work_summary, has_remaining_work, remaining_work_note, created_at";

pub struct ProjectReportRepo;

impl ProjectReportRepo {
    /// Append a report inside the caller's transaction.
    pub async fn create(
        conn: &mut PgConnection,
        project_id: DbId,
        engineer_id: DbId,
        input: &CreateProjectReport,
    ) -> Result<ProjectReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_reports
                (project_id, engineer_id, work_summary, has_remaining_work, remaining_work_note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectReport>(&query)
            .bind(project_id)
            .bind(engineer_id)
            .bind(&input.work_summary)
            .bind(input.has_remaining_work)
            .bind(&input.remaining_work_note)
            .fetch_one(conn)
            .await
    }

    /// Reports for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_reports WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectReport>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
