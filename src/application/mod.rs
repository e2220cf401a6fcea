// src/application/mod.rs
//
// Application Layer
//
// - The boundary between a UI and the services
// - Holds the session context and the live feeds
// - Translates between DTOs and domain entities

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod feeds;
pub mod session;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use feeds::{AdoptionRequestFeed, AnimalFeed};
pub use session::SessionContext;
pub use state::AppState;
