// src/services/authorization.rs
//
// Role gate run at the top of every service operation, before any read or
// write reaches a repository.

use crate::domain::access::{permits, Operation};
use crate::domain::user::Session;
use crate::error::{AppError, AppResult};

/// Returns the session if its role permits `operation`
///
/// Signed out is an authentication error; a signed-in role that lacks the
/// operation is forbidden.
pub fn authorize(session: Option<&Session>, operation: Operation) -> AppResult<&Session> {
    let session = session
        .ok_or_else(|| AppError::Authentication("You must be signed in".to_string()))?;

    if !permits(Some(session.role), operation) {
        log::warn!(
            "Denied {:?} for user {} with role {}",
            operation,
            session.user_id,
            session.role
        );
        return Err(AppError::forbidden(format!(
            "Role '{}' may not perform {:?}",
            session.role, operation
        )));
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserProfile};
    use uuid::Uuid;

    fn session(role: Role) -> Session {
        Session::from_profile(&UserProfile::new(
            Uuid::new_v4(),
            "someone@x.io".to_string(),
            None,
            role,
        ))
    }

    #[test]
    fn test_signed_out_is_authentication_error() {
        assert!(matches!(
            authorize(None, Operation::ListAnimals),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn test_user_cannot_respond() {
        let user = session(Role::User);
        assert!(matches!(
            authorize(Some(&user), Operation::RespondToRequest),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_cannot_submit() {
        let admin = session(Role::Admin);
        assert!(matches!(
            authorize(Some(&admin), Operation::SubmitRequest),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_permitted_returns_session() {
        let user = session(Role::User);
        let granted = authorize(Some(&user), Operation::SubmitRequest).unwrap();
        assert_eq!(granted.user_id, user.user_id);
    }
}
