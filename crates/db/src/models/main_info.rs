//! Main-info (1:1 project detail) model and DTO.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// A row from the `main_infos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MainInfo {
    pub id: DbId,
    pub project_id: DbId,
    pub contractor_name: Option<String>,
    pub contractor_contact: Option<String>,
    pub sales_staff: Option<String>,
    pub survey_staff: Option<String>,
    pub survey_date: Option<NaiveDate>,
    pub delivery_method: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub construction_content: Option<String>,
    pub construction_date: Option<NaiveDate>,
    pub product_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update; only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMainInfo {
    pub contractor_name: Option<String>,
    pub contractor_contact: Option<String>,
    pub sales_staff: Option<String>,
    pub survey_staff: Option<String>,
    pub survey_date: Option<NaiveDate>,
    pub delivery_method: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub construction_content: Option<String>,
    pub construction_date: Option<NaiveDate>,
    pub product_name: Option<String>,
    pub notes: Option<String>,
}
