//! Well-known role names and user types.
//!
//! These must match the CHECK constraints in
//! `20261001000001_create_users.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_VAXAL_ADMIN: &str = "VAXAL_ADMIN";
pub const ROLE_VAXAL_STAFF: &str = "VAXAL_STAFF";
pub const ROLE_CALL_CENTER: &str = "CALL_CENTER";

pub const ROLE_ENGINEER_MASTER: &str = "ENGINEER_MASTER";
pub const ROLE_ENGINEER: &str = "ENGINEER";

/// Roles a staff (`vaxal`) account may hold.
pub const STAFF_ROLES: &[&str] = &[ROLE_VAXAL_ADMIN, ROLE_VAXAL_STAFF, ROLE_CALL_CENTER];

/// Roles an engineer account may hold.
pub const ENGINEER_ROLES: &[&str] = &[ROLE_ENGINEER_MASTER, ROLE_ENGINEER];

/// Staff roles allowed to drive project transitions and write inventory.
pub const MANAGER_ROLES: &[&str] = &[ROLE_VAXAL_ADMIN, ROLE_VAXAL_STAFF];

/// Which user table an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Internal staff (`staff_users`).
    Vaxal,
    /// Field engineers (`engineers`).
    Engineer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vaxal => "vaxal",
            Self::Engineer => "engineer",
        }
    }

    /// Whether `role` is a valid role for this user type.
    pub fn accepts_role(&self, role: &str) -> bool {
        match self {
            Self::Vaxal => STAFF_ROLES.contains(&role),
            Self::Engineer => ENGINEER_ROLES.contains(&role),
        }
    }
}

pub fn is_manager_role(role: &str) -> bool {
    MANAGER_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_type_rejects_engineer_roles() {
        assert!(UserType::Vaxal.accepts_role(ROLE_CALL_CENTER));
        assert!(!UserType::Vaxal.accepts_role(ROLE_ENGINEER));
        assert!(!UserType::Vaxal.accepts_role("admin"));
    }

    #[test]
    fn engineer_type_rejects_staff_roles() {
        assert!(UserType::Engineer.accepts_role(ROLE_ENGINEER_MASTER));
        assert!(!UserType::Engineer.accepts_role(ROLE_VAXAL_ADMIN));
    }

    #[test]
    fn call_center_is_not_a_manager() {
        assert!(is_manager_role(ROLE_VAXAL_ADMIN));
        assert!(is_manager_role(ROLE_VAXAL_STAFF));
        assert!(!is_manager_role(ROLE_CALL_CENTER));
    }

    #[test]
    fn user_type_serializes_lowercase() {
        let json = serde_json::to_string(&UserType::Engineer).unwrap();
        assert_eq!(json, "\"engineer\"");
        let parsed: UserType = serde_json::from_str("\"vaxal\"").unwrap();
        assert_eq!(parsed, UserType::Vaxal);
    }
}
