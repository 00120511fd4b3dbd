//! User accounts: the admin and the loyalty-program clients.
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "client")]
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "client" => Some(UserRole::Client),
            _ => None,
        }
    }
}

/// An account; the phone number doubles as the login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique, used as the login identifier.
    pub phone: String,
    /// Opaque credential; equality-checked only, never interpreted.
    pub password: String,
    pub role: UserRole,
    /// Loyalty points, awarded in fixed increments on completed washes.
    pub points: i64,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}
