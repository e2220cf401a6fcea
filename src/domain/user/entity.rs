use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account-level permission tier, fixed at sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Profile record keyed by account id; holds the role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Credential record backing email/password sign-in
#[derive(Debug, Clone)]
pub struct Account {
    pub user_id: Uuid,

    /// Lowercased, trimmed
    pub email: String,

    /// PHC-formatted Argon2id hash
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// The signed-in user as seen by the screens
/// Lives only as long as the sign-in; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    pub signed_in_at: DateTime<Utc>,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Accepts the sign-up picker labels ("User", "Admin") as well as stored values
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UserProfile {
    pub fn new(id: Uuid, email: String, username: Option<String>, role: Role) -> Self {
        Self {
            id,
            email,
            username,
            role,
            created_at: Utc::now(),
        }
    }
}

impl Account {
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Session {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email.clone(),
            username: profile.username.clone(),
            role: profile.role,
            signed_in_at: Utc::now(),
        }
    }

    /// Session for an account whose profile record is missing
    pub fn without_profile(user_id: Uuid, email: String) -> Self {
        Self {
            user_id,
            email,
            username: None,
            role: Role::default(),
            signed_in_at: Utc::now(),
        }
    }

    /// Identity recorded on adoption requests: username when set, else email
    pub fn display_identity(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
