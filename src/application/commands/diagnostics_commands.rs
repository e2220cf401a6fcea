// src/application/commands/diagnostics_commands.rs
//
// Store diagnostics for administrators

use crate::application::commands::parse_id;
use crate::application::dto::DatabaseStatsDto;
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::state::AppState;
use crate::error::AppError;
use crate::services::AnimalStatusAudit;

pub async fn get_database_stats(state: &AppState) -> CommandResult<DatabaseStatsDto> {
    match state.session.current() {
        Some(session) if session.is_admin() => {}
        Some(_) => return Err(AppError::forbidden("Administrators only").into()),
        None => {
            return Err(ErrorResponse::from(AppError::Authentication(
                "You must be signed in".to_string(),
            )))
        }
    }

    let stats = state.database_stats()?;
    Ok(DatabaseStatsDto {
        size_bytes: stats.size_bytes,
        animal_count: stats.animal_count,
        adoption_request_count: stats.adoption_request_count,
        user_count: stats.user_count,
    })
}

/// Compare an animal's stored status with the one its requests imply
pub async fn audit_animal_status(
    state: &AppState,
    animal_id: String,
) -> CommandResult<AnimalStatusAudit> {
    let id = parse_id(&animal_id, "animal")?;
    let session = state.session.current();

    Ok(state.adoption_service.audit_animal(session.as_ref(), id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{report_animal, sign_up};
    use crate::application::dto::{ReportAnimalDto, SignUpDto};
    use crate::application::error_handling::ErrorType;
    use crate::config::AppConfig;

    async fn state_as(role: &str) -> AppState {
        let state = AppState::bootstrap(&AppConfig::in_memory()).unwrap();
        sign_up(
            &state,
            SignUpDto {
                email: format!("{}@x.io", role),
                password: "secret1".to_string(),
                role: role.to_string(),
                username: None,
            },
        )
        .await
        .unwrap();
        state
    }

    #[tokio::test]
    async fn test_admin_sees_stats() {
        let state = state_as("admin").await;
        report_animal(
            &state,
            ReportAnimalDto {
                name: "Rex".to_string(),
                description: "Shepherd".to_string(),
                photo: None,
                location: None,
            },
        )
        .await
        .unwrap();

        let stats = get_database_stats(&state).await.unwrap();

        assert_eq!(stats.animal_count, 1);
        assert_eq!(stats.user_count, 1);
    }

    #[tokio::test]
    async fn test_user_cannot_see_stats() {
        let state = state_as("user").await;

        let err = get_database_stats(&state).await.unwrap_err();

        assert_eq!(err.error_type, ErrorType::Forbidden);
    }

    #[tokio::test]
    async fn test_fresh_animal_audits_clean() {
        let state = state_as("admin").await;
        let animal = report_animal(
            &state,
            ReportAnimalDto {
                name: "Rex".to_string(),
                description: "Shepherd".to_string(),
                photo: None,
                location: None,
            },
        )
        .await
        .unwrap();

        let audit = audit_animal_status(&state, animal.id).await.unwrap();

        assert!(audit.is_consistent());
        assert_eq!(audit.request_count, 0);
    }
}
