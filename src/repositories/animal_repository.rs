// src/repositories/animal_repository.rs
//
// Animal persistence

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::mapping::{label_column, timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::animal::{Animal, AnimalStatus};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait AnimalRepository: Send + Sync {
    fn insert(&self, animal: &Animal) -> AppResult<()>;

    /// Writes name, description, photo and location; never status
    fn update_details(&self, animal: &Animal) -> AppResult<()>;

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Animal>>;

    fn list_all(&self) -> AppResult<Vec<Animal>>;

    /// Removes the animal and its requests together.
    /// Returns how many requests went with it.
    fn delete(&self, id: Uuid) -> AppResult<usize>;
}

pub struct SqliteAnimalRepository {
    pool: Arc<ConnectionPool>,
}

const ANIMAL_COLUMNS: &str =
    "id, name, description, photo, location, status, created_at, updated_at";

impl SqliteAnimalRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_animal(row: &Row) -> Result<Animal, rusqlite::Error> {
        Ok(Animal {
            id: uuid_column(row, "id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            photo: row.get("photo")?,
            location: row.get("location")?,
            status: label_column(row, "status", AnimalStatus::parse)?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl AnimalRepository for SqliteAnimalRepository {
    fn insert(&self, animal: &Animal) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO animals (
                id, name, description, photo, location, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                animal.id.to_string(),
                animal.name,
                animal.description,
                animal.photo,
                animal.location,
                animal.status.as_str(),
                animal.created_at.to_rfc3339(),
                animal.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn update_details(&self, animal: &Animal) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE animals
             SET name = ?1, description = ?2, photo = ?3, location = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                animal.name,
                animal.description,
                animal.photo,
                animal.location,
                animal.updated_at.to_rfc3339(),
                animal.id.to_string(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Animal>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM animals WHERE id = ?1",
            ANIMAL_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_animal) {
            Ok(animal) => Ok(Some(animal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Animal>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM animals ORDER BY created_at, name",
            ANIMAL_COLUMNS
        ))?;

        let animals = stmt
            .query_map([], Self::row_to_animal)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(animals)
    }

    fn delete(&self, id: Uuid) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let removed_requests = tx.execute(
            "DELETE FROM adoption_requests WHERE animal_id = ?1",
            params![id.to_string()],
        )?;

        let rows_affected = tx.execute("DELETE FROM animals WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            // dropping the transaction rolls back
            return Err(AppError::NotFound);
        }

        tx.commit()?;
        log::debug!(
            "Deleted animal {} with {} adoption requests at {}",
            id,
            removed_requests,
            Utc::now().to_rfc3339()
        );

        Ok(removed_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::{create_connection_pool, initialize_database};

    fn repository() -> SqliteAnimalRepository {
        let pool = create_connection_pool(&AppConfig::in_memory()).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteAnimalRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_insert_and_get() {
        let repo = repository();
        let mut animal = Animal::new("Biscuit".to_string(), "Terrier mix".to_string());
        animal.location = Some("Elm Street".to_string());

        repo.insert(&animal).unwrap();

        let loaded = repo.get_by_id(animal.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Biscuit");
        assert_eq!(loaded.location.as_deref(), Some("Elm Street"));
        assert_eq!(loaded.status, AnimalStatus::Available);
    }

    #[test]
    fn test_missing_animal_is_none() {
        let repo = repository();
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_details_leaves_status_alone() {
        let repo = repository();
        let mut animal = Animal::new("Biscuit".to_string(), "Terrier mix".to_string());
        repo.insert(&animal).unwrap();

        // a stale in-memory status must not be written back
        animal.status = AnimalStatus::Adopted;
        animal.update_details(Some("Cookie".to_string()), None, Some(Some("file:///a.jpg".to_string())), None);
        repo.update_details(&animal).unwrap();

        let loaded = repo.get_by_id(animal.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Cookie");
        assert_eq!(loaded.photo.as_deref(), Some("file:///a.jpg"));
        assert_eq!(loaded.status, AnimalStatus::Available);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let repo = repository();
        let animal = Animal::new("Ghost".to_string(), "Never stored".to_string());
        assert!(matches!(repo.update_details(&animal), Err(AppError::NotFound)));
    }

    #[test]
    fn test_delete() {
        let repo = repository();
        let animal = Animal::new("Biscuit".to_string(), "Terrier mix".to_string());
        repo.insert(&animal).unwrap();

        assert_eq!(repo.delete(animal.id).unwrap(), 0);
        assert!(repo.get_by_id(animal.id).unwrap().is_none());
        assert!(matches!(repo.delete(animal.id), Err(AppError::NotFound)));
    }

    #[test]
    fn test_list_all() {
        let repo = repository();
        repo.insert(&Animal::new("A".to_string(), "first".to_string())).unwrap();
        repo.insert(&Animal::new("B".to_string(), "second".to_string())).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 2);
    }
}
