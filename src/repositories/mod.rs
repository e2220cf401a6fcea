// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are data mappers
// - NO role checks
// - NO event emission
// - Paired request/animal writes share one transaction
// - Explicit SQL only

mod mapping;

pub mod account_repository;
pub mod adoption_repository;
pub mod animal_repository;
pub mod user_repository;

pub use account_repository::{is_unique_violation, AccountRepository, SqliteAccountRepository};
pub use adoption_repository::{
    AdoptionRequestRepository, DecisionOutcome, SqliteAdoptionRequestRepository, WithdrawnRequest,
};
pub use animal_repository::{AnimalRepository, SqliteAnimalRepository};
pub use user_repository::{SqliteUserProfileRepository, UserProfileRepository};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use adoption_repository::MockAdoptionRequestRepository;
#[cfg(test)]
pub use animal_repository::MockAnimalRepository;
#[cfg(test)]
pub use user_repository::MockUserProfileRepository;
