pub mod entity;
pub mod invariants;

pub use entity::{Animal, AnimalStatus};
pub use invariants::validate_animal;
