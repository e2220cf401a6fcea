// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod access;
pub mod adoption;
pub mod animal;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Animal Domain
pub use animal::{validate_animal, Animal, AnimalStatus};

// Adoption Domain
pub use adoption::{
    derive_animal_status, validate_adoption_request, AdoptionRequest, LifecycleAction,
    RequestStatus,
};

// User Domain
pub use user::{validate_credentials, validate_email, Account, Role, Session, UserProfile};

// Access (role gating)
pub use access::{initial_screen, operations_for, permits, screens_for, Operation, Screen};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
