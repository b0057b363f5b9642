//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Any Vaxal staff role.
//! - [`rbac::RequireManager`] -- `VAXAL_ADMIN` or `VAXAL_STAFF`.
//! - [`rbac::RequireAdmin`] -- `VAXAL_ADMIN` only.
//! - [`rbac::RequireEngineer`] -- `ENGINEER_MASTER` or `ENGINEER`.

pub mod auth;
pub mod rbac;
