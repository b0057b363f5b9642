//! Staff user and engineer models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxal_core::types::{DbId, Timestamp};

/// Full row from the `staff_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`StaffUserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct StaffUser {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe staff user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StaffUserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<StaffUser> for StaffUserResponse {
    fn from(u: StaffUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// DTO for inserting a staff user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateStaffUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStaffUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Full row from the `engineers` table.
#[derive(Debug, Clone, FromRow)]
pub struct Engineer {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub master_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineerResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub master_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<Engineer> for EngineerResponse {
    fn from(e: Engineer) -> Self {
        Self {
            id: e.id,
            email: e.email,
            name: e.name,
            phone: e.phone,
            role: e.role,
            master_id: e.master_id,
            is_active: e.is_active,
            created_at: e.created_at,
        }
    }
}

/// DTO for inserting an engineer. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateEngineer {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub master_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEngineer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub master_id: Option<DbId>,
    pub is_active: Option<bool>,
}
