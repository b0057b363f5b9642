//! Notifications created as side effects of project workflow transitions.
//!
//! - [`dispatcher`] -- builds and inserts the notification row for a
//!   transition inside the caller's transaction.

pub mod dispatcher;

pub use dispatcher::dispatch;
