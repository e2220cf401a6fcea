// src/application/commands/auth_commands.rs
//
// Sign-up, sign-in, sign-out

use crate::application::dto::{SessionDto, SignInDto, SignUpDto};
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::state::AppState;
use crate::domain::user::Role;
use crate::services::SignUpRequest;

/// Create an account and start its session
pub async fn sign_up(state: &AppState, dto: SignUpDto) -> CommandResult<SessionDto> {
    let role = Role::parse(&dto.role)
        .ok_or_else(|| ErrorResponse::validation(format!("Unknown role '{}'", dto.role)))?;

    let session = state.auth_service.sign_up(SignUpRequest {
        email: dto.email,
        password: dto.password,
        role,
        username: dto.username,
    })?;

    state.session.begin(session.clone());
    Ok(SessionDto::from(session))
}

pub async fn sign_in(state: &AppState, dto: SignInDto) -> CommandResult<SessionDto> {
    let session = state.auth_service.sign_in(&dto.email, &dto.password)?;

    state.session.begin(session.clone());
    Ok(SessionDto::from(session))
}

/// Clearing an already empty session is not an error
pub async fn sign_out(state: &AppState) -> CommandResult<()> {
    if let Some(session) = state.session.end() {
        state.auth_service.sign_out(&session);
    }
    Ok(())
}

pub async fn current_session(state: &AppState) -> CommandResult<Option<SessionDto>> {
    Ok(state.session.current().map(SessionDto::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::config::AppConfig;

    fn sign_up_dto(email: &str, role: &str) -> SignUpDto {
        SignUpDto {
            email: email.to_string(),
            password: "secret1".to_string(),
            role: role.to_string(),
            username: None,
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let state = AppState::bootstrap(&AppConfig::in_memory()).unwrap();

        let created = sign_up(&state, sign_up_dto("ann@x.io", "Admin")).await.unwrap();
        assert_eq!(created.role, "admin");
        assert!(current_session(&state).await.unwrap().is_some());

        sign_out(&state).await.unwrap();
        assert!(current_session(&state).await.unwrap().is_none());

        let signed_in = sign_in(
            &state,
            SignInDto {
                email: "ann@x.io".to_string(),
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(signed_in.user_id, created.user_id);
        assert_eq!(signed_in.role, "admin");
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_signed_out() {
        let state = AppState::bootstrap(&AppConfig::in_memory()).unwrap();

        let err = sign_in(
            &state,
            SignInDto {
                email: "nobody@x.io".to_string(),
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::Authentication);
        assert!(state.session.current().is_none());
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let state = AppState::bootstrap(&AppConfig::in_memory()).unwrap();

        let err = sign_up(&state, sign_up_dto("bob@x.io", "superuser"))
            .await
            .unwrap_err();

        assert_eq!(err.error_type, ErrorType::Validation);
    }
}
