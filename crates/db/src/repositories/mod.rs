//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept `&PgPool` as the first argument. Methods that take part in a
//! multi-statement workflow accept `&mut PgConnection` instead, so callers can
//! pass a transaction.

pub mod calendar_event_repo;
pub mod engineer_repo;
pub mod file_metadata_repo;
pub mod inventory_repo;
pub mod main_info_repo;
pub mod notification_repo;
pub mod project_report_repo;
pub mod project_repo;
pub mod staff_user_repo;

pub use calendar_event_repo::CalendarEventRepo;
pub use engineer_repo::EngineerRepo;
pub use file_metadata_repo::FileMetadataRepo;
pub use inventory_repo::InventoryRepo;
pub use main_info_repo::MainInfoRepo;
pub use notification_repo::NotificationRepo;
pub use project_report_repo::ProjectReportRepo;
pub use project_repo::ProjectRepo;
pub use staff_user_repo::StaffUserRepo;
