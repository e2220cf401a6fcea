// src/repositories/user_repository.rs
//
// Profile records (the users table)

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::mapping::{label_column, timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::user::{Role, UserProfile};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait UserProfileRepository: Send + Sync {
    /// Insert or update by id
    fn save(&self, profile: &UserProfile) -> AppResult<()>;

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>>;
}

pub struct SqliteUserProfileRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserProfileRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &Row) -> Result<UserProfile, rusqlite::Error> {
        Ok(UserProfile {
            id: uuid_column(row, "id")?,
            email: row.get("email")?,
            username: row.get("username")?,
            role: label_column(row, "role", Role::parse)?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl UserProfileRepository for SqliteUserProfileRepository {
    fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (id, email, username, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                username = excluded.username,
                role = excluded.role",
            params![
                profile.id.to_string(),
                profile.email,
                profile.username,
                profile.role.as_str(),
                profile.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, username, role, created_at FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_profile) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::{create_connection_pool, initialize_database};

    fn repository() -> SqliteUserProfileRepository {
        let pool = create_connection_pool(&AppConfig::in_memory()).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteUserProfileRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_save_and_get() {
        let repo = repository();
        let profile = UserProfile::new(
            Uuid::new_v4(),
            "ann@x.io".to_string(),
            Some("ann".to_string()),
            Role::Admin,
        );

        repo.save(&profile).unwrap();

        let loaded = repo.get_by_id(profile.id).unwrap().unwrap();
        assert_eq!(loaded.role, Role::Admin);
        assert_eq!(loaded.username.as_deref(), Some("ann"));
    }

    #[test]
    fn test_save_updates_existing() {
        let repo = repository();
        let mut profile = UserProfile::new(Uuid::new_v4(), "bob@x.io".to_string(), None, Role::User);
        repo.save(&profile).unwrap();

        profile.username = Some("bob".to_string());
        repo.save(&profile).unwrap();

        let loaded = repo.get_by_id(profile.id).unwrap().unwrap();
        assert_eq!(loaded.username.as_deref(), Some("bob"));
    }

    #[test]
    fn test_missing_profile() {
        let repo = repository();
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }
}
