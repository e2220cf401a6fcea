pub mod entity;
pub mod invariants;
pub mod lifecycle;

pub use entity::{AdoptionRequest, RequestStatus};
pub use invariants::validate_adoption_request;
pub use lifecycle::{derive_animal_status, LifecycleAction};
