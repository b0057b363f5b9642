//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and the login password policy.
//! - [`jwt`] -- HS256 access tokens carrying role and user type.

pub mod jwt;
pub mod password;
