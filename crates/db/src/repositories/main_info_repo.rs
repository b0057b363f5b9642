//! Repository for the `main_infos` table.

use sqlx::{PgExecutor, PgPool};
use vaxal_core::types::DbId;

use crate::models::main_info::{MainInfo, UpdateMainInfo};

const COLUMNS: &str = "id, project_id, contractor_name, contractor_contact, sales_staff, \
    survey_staff, survey_date, delivery_method, delivery_date, construction_content, \
    construction_date, product_name, notes, created_at, updated_at";

/// Access to the 1:1 main-info record of a project.
pub struct MainInfoRepo;

impl MainInfoRepo {
    /// Load the main-info of a project. Accepts a pool or an open transaction
    /// so the assignment check reads the row under the project lock.
    pub async fn find_by_project<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Option<MainInfo>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM main_infos WHERE project_id = $1");
        sqlx::query_as::<_, MainInfo>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Update the main-info of a project. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the project has no main-info row.
    pub async fn update_by_project(
        pool: &PgPool,
        project_id: DbId,
        input: &UpdateMainInfo,
    ) -> Result<Option<MainInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE main_infos SET
                contractor_name = COALESCE($2, contractor_name),
                contractor_contact = COALESCE($3, contractor_contact),
                sales_staff = COALESCE($4, sales_staff),
                survey_staff = COALESCE($5, survey_staff),
                survey_date = COALESCE($6, survey_date),
                delivery_method = COALESCE($7, delivery_method),
                delivery_date = COALESCE($8, delivery_date),
                construction_content = COALESCE($9, construction_content),
                construction_date = COALESCE($10, construction_date),
                product_name = COALESCE($11, product_name),
                notes = COALESCE($12, notes)
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainInfo>(&query)
            .bind(project_id)
            .bind(&input.contractor_name)
            .bind(&input.contractor_contact)
            .bind(&input.sales_staff)
            .bind(&input.survey_staff)
            .bind(input.survey_date)
            .bind(&input.delivery_method)
            .bind(input.delivery_date)
            .bind(&input.construction_content)
            .bind(input.construction_date)
            .bind(&input.product_name)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }
}
