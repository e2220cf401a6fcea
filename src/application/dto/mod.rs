// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Ids and timestamps travel as strings

use serde::{Deserialize, Serialize};

use crate::domain::access::Screen;
use crate::domain::animal::Animal;
use crate::domain::user::Session;
use crate::services::AdoptionRequestView;

// ============================================================================
// ANIMAL DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnimalDto {
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    pub location: Option<String>,
}

/// Absent fields are left unchanged.
/// `photo`/`location` set to an empty string clear the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnimalDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub location: Option<String>,
}

impl From<Animal> for AnimalDto {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id.to_string(),
            name: animal.name,
            description: animal.description,
            photo: animal.photo,
            location: animal.location,
            status: animal.status.to_string(),
            created_at: animal.created_at.to_rfc3339(),
            updated_at: animal.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// ADOPTION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionRequestDto {
    pub id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub requester_id: String,
    pub requester: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AdoptionRequestView> for AdoptionRequestDto {
    fn from(view: AdoptionRequestView) -> Self {
        let request = view.request;
        Self {
            id: request.id.to_string(),
            animal_id: request.animal_id.to_string(),
            animal_name: view.animal_name,
            requester_id: request.requester_id.to_string(),
            requester: request.requester,
            status: request.status.to_string(),
            created_at: request.created_at.to_rfc3339(),
            updated_at: request.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToRequestDto {
    pub request_id: String,
    pub accepted: bool,
}

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpDto {
    pub email: String,
    pub password: String,
    /// "user" or "admin"; the sign-up picker's labels are accepted too
    pub role: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub user_id: String,
    pub email: String,
    pub username: Option<String>,
    pub display_name: String,
    pub role: String,
    pub screens: Vec<Screen>,
    pub signed_in_at: String,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id.to_string(),
            display_name: session.display_identity().to_string(),
            screens: crate::domain::access::screens_for(Some(session.role)).to_vec(),
            role: session.role.to_string(),
            email: session.email,
            username: session.username,
            signed_in_at: session.signed_in_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// DIAGNOSTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatsDto {
    pub size_bytes: i64,
    pub animal_count: i64,
    pub adoption_request_count: i64,
    pub user_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::AdoptionRequest;
    use crate::domain::animal::AnimalStatus;
    use crate::domain::user::{Role, UserProfile};
    use uuid::Uuid;

    #[test]
    fn test_animal_status_label() {
        let mut animal = Animal::new("Rex".to_string(), "Shepherd".to_string());
        animal.status = AnimalStatus::PendingAdoption;

        let dto = AnimalDto::from(animal);

        assert_eq!(dto.status, "Pending Adoption");
    }

    #[test]
    fn test_request_dto_carries_animal_name() {
        let view = AdoptionRequestView {
            request: AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4(), "bob".to_string()),
            animal_name: "Rex".to_string(),
        };

        let dto = AdoptionRequestDto::from(view);

        assert_eq!(dto.animal_name, "Rex");
        assert_eq!(dto.status, "Pending");
    }

    #[test]
    fn test_session_dto_lists_screens() {
        let session = Session::from_profile(&UserProfile::new(
            Uuid::new_v4(),
            "bob@x.io".to_string(),
            None,
            Role::User,
        ));

        let dto = SessionDto::from(session);

        assert_eq!(dto.display_name, "bob@x.io");
        assert_eq!(dto.role, "user");
        assert!(dto.screens.contains(&Screen::RequestAdoption));
        assert!(!dto.screens.contains(&Screen::AddReport));
    }
}
