// src/services/auth_service.rs
//
// Email/password accounts. The role lives on the profile record and is
// read once per sign-in to build the Session.

use std::sync::Arc;

use crate::domain::user::{
    normalize_email, validate_credentials, validate_new_password, Account, Role, Session,
    UserProfile,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserSignedIn, UserSignedOut, UserSignedUp};
use crate::infrastructure::{hash_password, verify_password};
use crate::repositories::{is_unique_violation, AccountRepository, UserProfileRepository};

const EMAIL_IN_USE: &str = "The email address is already in use by another account.";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub username: Option<String>,
}

pub struct AuthService {
    account_repo: Arc<dyn AccountRepository>,
    profile_repo: Arc<dyn UserProfileRepository>,
    event_bus: Arc<EventBus>,
}

impl AuthService {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        profile_repo: Arc<dyn UserProfileRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            account_repo,
            profile_repo,
            event_bus,
        }
    }

    /// Create an account with its profile and sign it in
    pub fn sign_up(&self, request: SignUpRequest) -> AppResult<Session> {
        validate_credentials(&request.email, &request.password).map_err(AppError::from_input)?;
        validate_new_password(&request.password).map_err(AppError::from_input)?;

        if self.account_repo.get_by_email(&request.email)?.is_some() {
            return Err(AppError::Authentication(EMAIL_IN_USE.to_string()));
        }

        let username = request
            .username
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let account = Account::new(&request.email, hash_password(&request.password)?);
        let profile = UserProfile::new(account.user_id, account.email.clone(), username, request.role);

        self.account_repo
            .create_with_profile(&account, &profile)
            .map_err(|e| {
                // lost a race with another sign-up for the same email
                if is_unique_violation(&e) {
                    AppError::Authentication(EMAIL_IN_USE.to_string())
                } else {
                    e
                }
            })?;

        log::info!("Account {} created with role {}", profile.id, profile.role);
        self.event_bus.emit(UserSignedUp::new(profile.id, profile.role));

        Ok(Session::from_profile(&profile))
    }

    /// Check credentials and attach the role from the profile record
    ///
    /// An account without a profile signs in with the default role.
    pub fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        validate_credentials(email, password).map_err(AppError::from_input)?;

        let account = self
            .account_repo
            .get_by_email(email)?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &account.password_hash)? {
            log::warn!("Failed sign-in for {}", normalize_email(email));
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let session = match self.profile_repo.get_by_id(account.user_id)? {
            Some(profile) => Session::from_profile(&profile),
            None => {
                log::warn!(
                    "Account {} has no profile record, signing in as {}",
                    account.user_id,
                    Role::default()
                );
                Session::without_profile(account.user_id, account.email.clone())
            }
        };

        self.event_bus
            .emit(UserSignedIn::new(session.user_id, session.role));
        Ok(session)
    }

    pub fn sign_out(&self, session: &Session) {
        log::info!("User {} signed out", session.user_id);
        self.event_bus.emit(UserSignedOut::new(session.user_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::{create_connection_pool, initialize_database};
    use crate::repositories::{
        MockAccountRepository, MockUserProfileRepository, SqliteAccountRepository,
        SqliteUserProfileRepository,
    };

    fn service() -> AuthService {
        let pool = Arc::new(create_connection_pool(&AppConfig::in_memory()).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        AuthService::new(
            Arc::new(SqliteAccountRepository::new(pool.clone())),
            Arc::new(SqliteUserProfileRepository::new(pool)),
            Arc::new(EventBus::new()),
        )
    }

    fn sign_up_request(email: &str, password: &str, role: Role) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
            username: None,
        }
    }

    #[test]
    fn test_sign_up_then_sign_in_keeps_role() {
        let auth = service();

        let created = auth
            .sign_up(sign_up_request("Ann@X.io", "secret1", Role::Admin))
            .unwrap();
        assert_eq!(created.role, Role::Admin);
        assert_eq!(created.email, "ann@x.io");

        let session = auth.sign_in("ann@x.io", "secret1").unwrap();
        assert_eq!(session.user_id, created.user_id);
        assert!(session.is_admin());
    }

    #[test]
    fn test_duplicate_email() {
        let auth = service();
        auth.sign_up(sign_up_request("bob@x.io", "secret1", Role::User))
            .unwrap();

        let err = auth
            .sign_up(sign_up_request("BOB@x.io", "secret2", Role::User))
            .unwrap_err();

        assert_eq!(err.to_string(), EMAIL_IN_USE);
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = service();
        auth.sign_up(sign_up_request("bob@x.io", "secret1", Role::User))
            .unwrap();

        let wrong = auth.sign_in("bob@x.io", "secret2").unwrap_err();
        let unknown = auth.sign_in("nobody@x.io", "secret1").unwrap_err();

        assert!(matches!(wrong, AppError::Authentication(_)));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn test_empty_fields_rejected_before_store() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_get_by_email().never();
        accounts.expect_create_with_profile().never();
        let auth = AuthService::new(
            Arc::new(accounts),
            Arc::new(MockUserProfileRepository::new()),
            Arc::new(EventBus::new()),
        );

        let err = auth.sign_in("", "secret1").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Please fill in all fields"));

        let err = auth
            .sign_up(sign_up_request("bob@x.io", "123", Role::User))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_missing_profile_defaults_to_user() {
        let hash = hash_password("secret1").unwrap();
        let account = Account::new("ghost@x.io", hash);
        let user_id = account.user_id;

        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_get_by_email()
            .returning(move |_| Ok(Some(account.clone())));
        let mut profiles = MockUserProfileRepository::new();
        profiles.expect_get_by_id().returning(|_| Ok(None));

        let auth = AuthService::new(Arc::new(accounts), Arc::new(profiles), Arc::new(EventBus::new()));

        let session = auth.sign_in("ghost@x.io", "secret1").unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.role, Role::User);
    }

    #[test]
    fn test_username_becomes_display_identity() {
        let auth = service();
        let mut request = sign_up_request("bob@x.io", "secret1", Role::User);
        request.username = Some("  bob  ".to_string());

        let session = auth.sign_up(request).unwrap();

        assert_eq!(session.display_identity(), "bob");
    }
}
