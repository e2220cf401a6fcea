// src/repositories/adoption_repository.rs
//
// Adoption request persistence
//
// Every request write is paired with a write of the animal's status inside
// one transaction. The status written is derived from the animal's requests
// as they stand after the request write, so both documents always agree.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Row, Transaction};
use uuid::Uuid;

use super::mapping::{label_column, timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::adoption::{derive_animal_status, AdoptionRequest, RequestStatus};
use crate::domain::animal::AnimalStatus;
use crate::error::{AppError, AppResult};

/// A removed request and the status its animal was left in
///
/// `animal_status` is `None` when the animal no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawnRequest {
    pub request: AdoptionRequest,
    pub animal_status: Option<AnimalStatus>,
}

/// Result of persisting a decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionOutcome {
    /// The decision landed; carries the animal's new status, `None` if the
    /// animal no longer exists
    Applied(Option<AnimalStatus>),
    /// The request was already decided or removed; nothing was written
    Stale,
}

#[cfg_attr(test, mockall::automock)]
pub trait AdoptionRequestRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<AdoptionRequest>>;

    fn list_all(&self) -> AppResult<Vec<AdoptionRequest>>;

    fn list_by_requester(&self, requester_id: Uuid) -> AppResult<Vec<AdoptionRequest>>;

    fn list_by_animal(&self, animal_id: Uuid) -> AppResult<Vec<AdoptionRequest>>;

    /// Store a new request and move its animal to the derived status.
    /// Fails with NotFound if the animal is gone.
    fn insert_and_sync(&self, request: &AdoptionRequest) -> AppResult<AnimalStatus>;

    /// Persist a decision on a request that is still Pending
    fn decide_and_sync(&self, request: &AdoptionRequest) -> AppResult<DecisionOutcome>;

    /// Remove a request and re-derive its animal's status.
    /// Returns `None` without writing anything if the request does not exist.
    fn delete_and_sync(&self, id: Uuid) -> AppResult<Option<WithdrawnRequest>>;
}

pub struct SqliteAdoptionRequestRepository {
    pool: Arc<ConnectionPool>,
}

const REQUEST_COLUMNS: &str =
    "id, animal_id, requester_id, requester, status, created_at, updated_at";

impl SqliteAdoptionRequestRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &Row) -> Result<AdoptionRequest, rusqlite::Error> {
        Ok(AdoptionRequest {
            id: uuid_column(row, "id")?,
            animal_id: uuid_column(row, "animal_id")?,
            requester_id: uuid_column(row, "requester_id")?,
            requester: row.get("requester")?,
            status: label_column(row, "status", RequestStatus::parse)?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    fn query_requests(
        &self,
        filter: &str,
        param: Option<String>,
    ) -> AppResult<Vec<AdoptionRequest>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM adoption_requests {} ORDER BY created_at DESC",
            REQUEST_COLUMNS, filter
        ))?;

        let requests = match param {
            Some(value) => stmt
                .query_map(params![value], Self::row_to_request)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], Self::row_to_request)?
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(requests)
    }

    /// Rewrite the animal's status from its current requests.
    /// `None` if the animal row does not exist.
    fn sync_animal_status(
        tx: &Transaction,
        animal_id: Uuid,
    ) -> Result<Option<AnimalStatus>, rusqlite::Error> {
        let mut stmt = tx.prepare("SELECT status FROM adoption_requests WHERE animal_id = ?1")?;
        let statuses = stmt
            .query_map(params![animal_id.to_string()], |row| {
                label_column(row, "status", RequestStatus::parse)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let status = derive_animal_status(&statuses);

        let rows_affected = tx.execute(
            "UPDATE animals SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), Utc::now().to_rfc3339(), animal_id.to_string()],
        )?;

        Ok((rows_affected > 0).then_some(status))
    }
}

impl AdoptionRequestRepository for SqliteAdoptionRequestRepository {
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<AdoptionRequest>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM adoption_requests WHERE id = ?1",
            REQUEST_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_request) {
            Ok(request) => Ok(Some(request)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<AdoptionRequest>> {
        self.query_requests("", None)
    }

    fn list_by_requester(&self, requester_id: Uuid) -> AppResult<Vec<AdoptionRequest>> {
        self.query_requests("WHERE requester_id = ?1", Some(requester_id.to_string()))
    }

    fn list_by_animal(&self, animal_id: Uuid) -> AppResult<Vec<AdoptionRequest>> {
        self.query_requests("WHERE animal_id = ?1", Some(animal_id.to_string()))
    }

    fn insert_and_sync(&self, request: &AdoptionRequest) -> AppResult<AnimalStatus> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let animal_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM animals WHERE id = ?1)",
            params![request.animal_id.to_string()],
            |row| row.get(0),
        )?;
        if !animal_exists {
            return Err(AppError::NotFound);
        }

        tx.execute(
            "INSERT INTO adoption_requests (
                id, animal_id, requester_id, requester, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                request.id.to_string(),
                request.animal_id.to_string(),
                request.requester_id.to_string(),
                request.requester,
                request.status.as_str(),
                request.created_at.to_rfc3339(),
                request.updated_at.to_rfc3339(),
            ],
        )?;

        let status = Self::sync_animal_status(&tx, request.animal_id)?.ok_or(AppError::NotFound)?;

        tx.commit()?;
        Ok(status)
    }

    fn decide_and_sync(&self, request: &AdoptionRequest) -> AppResult<DecisionOutcome> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        // the Pending guard makes concurrent decisions on one request first-wins
        let rows_affected = tx.execute(
            "UPDATE adoption_requests
             SET status = ?1, updated_at = ?2
             WHERE id = ?3 AND status = 'Pending'",
            params![
                request.status.as_str(),
                request.updated_at.to_rfc3339(),
                request.id.to_string(),
            ],
        )?;

        if rows_affected == 0 {
            return Ok(DecisionOutcome::Stale);
        }

        let status = Self::sync_animal_status(&tx, request.animal_id)?;

        tx.commit()?;
        Ok(DecisionOutcome::Applied(status))
    }

    fn delete_and_sync(&self, id: Uuid) -> AppResult<Option<WithdrawnRequest>> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let request = {
            let mut stmt = tx.prepare(&format!(
                "SELECT {} FROM adoption_requests WHERE id = ?1",
                REQUEST_COLUMNS
            ))?;
            match stmt.query_row(params![id.to_string()], Self::row_to_request) {
                Ok(request) => request,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(AppError::Database(e)),
            }
        };

        tx.execute(
            "DELETE FROM adoption_requests WHERE id = ?1",
            params![id.to_string()],
        )?;

        let animal_status = Self::sync_animal_status(&tx, request.animal_id)?;

        tx.commit()?;
        Ok(Some(WithdrawnRequest {
            request,
            animal_status,
        }))
    }
}
