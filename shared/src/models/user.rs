//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Role of a signed-in user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operates the platform across all mills
    SuperAdmin,
    /// Owner or administrator of one mill
    Admin,
    /// Day-to-day operator of one mill
    Manager,
}

impl Role {
    pub fn can_manage_mills(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    pub fn can_manage_employees(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "Super Admin"),
            Role::Admin => write!(f, "Admin"),
            Role::Manager => write!(f, "Manager"),
        }
    }
}

/// Profile of the signed-in user as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Mill the user belongs to; absent for super admins
    #[serde(default)]
    pub mill_id: Option<Uuid>,
}

/// A user account listed in the admin screens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub mill_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
    pub mill_id: Option<Uuid>,
}
