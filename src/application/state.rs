// src/application/state.rs

use std::sync::Arc;

use crate::application::session::SessionContext;
use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseStats,
};
use crate::domain::adoption::AdoptionRequest;
use crate::domain::animal::Animal;
use crate::error::AppResult;
use crate::events::{
    AdoptionRequested, AdoptionResponded, AdoptionWithdrawn, AnimalDeleted, AnimalReported,
    AnimalUpdated, EventBus, LiveCollection,
};
use crate::repositories::{
    AdoptionRequestRepository, AnimalRepository, SqliteAccountRepository,
    SqliteAdoptionRequestRepository, SqliteAnimalRepository, SqliteUserProfileRepository,
};
use crate::services::{AdoptionService, AnimalService, AuthService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub session: Arc<SessionContext>,
    pub auth_service: Arc<AuthService>,
    pub animal_service: Arc<AnimalService>,
    pub adoption_service: Arc<AdoptionService>,
    pub animal_feed: Arc<LiveCollection<Animal>>,
    pub request_feed: Arc<LiveCollection<AdoptionRequest>>,
}

impl AppState {
    /// Open the store, apply the schema and wire every layer
    pub fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(config)?);
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }

        let event_bus = Arc::new(EventBus::new());

        let animal_repo: Arc<dyn AnimalRepository> =
            Arc::new(SqliteAnimalRepository::new(pool.clone()));
        let request_repo: Arc<dyn AdoptionRequestRepository> =
            Arc::new(SqliteAdoptionRequestRepository::new(pool.clone()));
        let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
        let profile_repo = Arc::new(SqliteUserProfileRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            account_repo,
            profile_repo,
            event_bus.clone(),
        ));
        let animal_service = Arc::new(AnimalService::new(animal_repo.clone(), event_bus.clone()));
        let adoption_service = Arc::new(AdoptionService::new(
            animal_repo.clone(),
            request_repo.clone(),
            event_bus.clone(),
        ));

        // animals first: request feeds join against the animal snapshot
        let animal_feed = {
            let repo = animal_repo.clone();
            LiveCollection::new("animals", move || repo.list_all())?
        };
        animal_feed.refresh_on::<AnimalReported>(&event_bus);
        animal_feed.refresh_on::<AnimalUpdated>(&event_bus);
        animal_feed.refresh_on::<AnimalDeleted>(&event_bus);
        animal_feed.refresh_on::<AdoptionRequested>(&event_bus);
        animal_feed.refresh_on::<AdoptionResponded>(&event_bus);
        animal_feed.refresh_on::<AdoptionWithdrawn>(&event_bus);

        let request_feed = {
            let repo = request_repo.clone();
            LiveCollection::new("adoption_requests", move || repo.list_all())?
        };
        request_feed.refresh_on::<AnimalDeleted>(&event_bus);
        request_feed.refresh_on::<AdoptionRequested>(&event_bus);
        request_feed.refresh_on::<AdoptionResponded>(&event_bus);
        request_feed.refresh_on::<AdoptionWithdrawn>(&event_bus);

        log::info!("Application state initialised");

        Ok(Self {
            pool,
            event_bus,
            session: Arc::new(SessionContext::new()),
            auth_service,
            animal_service,
            adoption_service,
            animal_feed,
            request_feed,
        })
    }

    pub fn database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = get_connection(&self.pool)?;
        get_database_stats(&conn)
    }
}
