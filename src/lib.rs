// src/lib.rs
// RescuePaws - animal rescue reports and adoption requests
//
// Architecture:
// - Domain-centric: business rules live in the domain (status derivation,
//   role table, validation)
// - Event-driven: services emit after commit; live collections listen
// - Explicit: the session is context, not a global
// - Paired request/animal writes are a single transaction

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    derive_animal_status,
    initial_screen,
    operations_for,
    permits,
    screens_for,
    validate_adoption_request,
    validate_animal,
    validate_credentials,
    validate_email,
    // Users
    Account,
    // Adoption
    AdoptionRequest,
    // Animals
    Animal,
    AnimalStatus,
    DomainError,
    DomainResult,
    LifecycleAction,
    // Access
    Operation,
    RequestStatus,
    Role,
    Screen,
    Session,
    UserProfile,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::{AppConfig, DatabaseLocation};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    AdoptionRequested,
    AdoptionResponded,
    AdoptionWithdrawn,
    AnimalDeleted,
    AnimalReported,
    AnimalUpdated,
    DomainEvent,
    EventBus,
    EventLogEntry,
    LiveCollection,
    Subscription,
    UserSignedIn,
    UserSignedOut,
    UserSignedUp,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AccountRepository,
    AdoptionRequestRepository,
    AnimalRepository,
    DecisionOutcome,
    SqliteAccountRepository,
    SqliteAdoptionRequestRepository,
    SqliteAnimalRepository,
    SqliteUserProfileRepository,
    UserProfileRepository,
    WithdrawnRequest,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    authorize,
    AdoptionRequestView,
    AdoptionService,
    AnimalService,
    AnimalStatusAudit,
    AuthService,
    ReportAnimalRequest,
    SignUpRequest,
    UpdateAnimalRequest,
    WithdrawOutcome,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{
    AdoptionRequestFeed, AnimalFeed, AppState, CommandResult, ErrorResponse, ErrorType,
    SessionContext,
};
