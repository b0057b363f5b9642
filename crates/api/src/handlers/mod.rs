//! HTTP handlers, one module per resource.

pub mod auth;
pub mod calendar;
pub mod cron;
pub mod engineer_project;
pub mod file;
pub mod inventory;
pub mod main_info;
pub mod notification;
pub mod project;
pub mod user;
pub mod workflow;
