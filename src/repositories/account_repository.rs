// src/repositories/account_repository.rs
//
// Email/password credential records

use std::sync::Arc;

use rusqlite::{params, Row};

use super::mapping::{timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::user::{normalize_email, Account, UserProfile};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait AccountRepository: Send + Sync {
    /// Store the account and its profile record together
    fn create_with_profile(&self, account: &Account, profile: &UserProfile) -> AppResult<()>;

    /// Lookup is case-insensitive
    fn get_by_email(&self, email: &str) -> AppResult<Option<Account>>;
}

pub struct SqliteAccountRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAccountRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
        Ok(Account {
            user_id: uuid_column(row, "user_id")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl AccountRepository for SqliteAccountRepository {
    fn create_with_profile(&self, account: &Account, profile: &UserProfile) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO accounts (user_id, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                account.user_id.to_string(),
                account.email,
                account.password_hash,
                account.created_at.to_rfc3339(),
            ],
        )?;

        tx.execute(
            "INSERT INTO users (id, email, username, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                profile.id.to_string(),
                profile.email,
                profile.username,
                profile.role.as_str(),
                profile.created_at.to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn get_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, email, password_hash, created_at FROM accounts WHERE email = ?1",
        )?;

        match stmt.query_row(params![normalize_email(email)], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

/// True when the error is SQLite rejecting a duplicate key
pub fn is_unique_violation(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Database(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
