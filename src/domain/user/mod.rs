pub mod entity;
pub mod invariants;

pub use entity::{normalize_email, Account, Role, Session, UserProfile};
pub use invariants::{
    validate_credentials, validate_email, validate_new_password, MIN_PASSWORD_LENGTH,
};
