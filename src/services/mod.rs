// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services gate by role, validate, call repositories and emit events.

pub mod adoption_service;
pub mod animal_service;
pub mod auth_service;
pub mod authorization;

pub use adoption_service::{
    join_with_animals,
    visible_to,
    AdoptionRequestView,
    AdoptionService,
    AnimalStatusAudit,
    WithdrawOutcome,
    UNKNOWN_ANIMAL_NAME,
};

pub use animal_service::{
    AnimalService,
    ReportAnimalRequest,
    UpdateAnimalRequest,
};

pub use auth_service::{
    AuthService,
    SignUpRequest,
};

pub use authorization::authorize;
