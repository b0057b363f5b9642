//! Domain logic for the Vaxal operations backend.
//!
//! This crate has no database or HTTP dependencies. Everything here operates
//! on plain values passed in by the `db` and `api` crates.

pub mod assignment;
pub mod calendar;
pub mod error;
pub mod inventory;
pub mod jst;
pub mod notification;
pub mod pagination;
pub mod project_status;
pub mod roles;
pub mod storage;
pub mod types;
