// src/application/commands/mod.rs
//
// Command Handlers
//
// - Commands are thin adapters between the UI and the services
// - Commands accept DTOs, return DTOs
// - The acting session is always read from the SessionContext
// - Commands never contain business rules

pub mod adoption_commands;
pub mod animal_commands;
pub mod auth_commands;
pub mod diagnostics_commands;

pub use adoption_commands::*;
pub use animal_commands::*;
pub use auth_commands::*;
pub use diagnostics_commands::*;

use uuid::Uuid;

use crate::application::error_handling::{CommandResult, ErrorResponse};

/// Ids arrive as strings from the UI
pub(crate) fn parse_id(raw: &str, what: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} id '{}': {}", what, raw, e)))
}
