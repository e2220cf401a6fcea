// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Implementation details that support the domain but are not part of it.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior

pub mod password;

pub use password::{hash_password, verify_password};
