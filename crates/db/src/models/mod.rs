//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod calendar_event;
pub mod file_metadata;
pub mod inventory;
pub mod main_info;
pub mod notification;
pub mod project;
pub mod project_report;
pub mod user;
