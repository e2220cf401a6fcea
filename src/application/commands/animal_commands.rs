// src/application/commands/animal_commands.rs
//
// Animal report command handlers

use crate::application::commands::parse_id;
use crate::application::dto::{AnimalDto, ReportAnimalDto, UpdateAnimalDto};
use crate::application::error_handling::CommandResult;
use crate::application::feeds::AnimalFeed;
use crate::application::state::AppState;
use crate::domain::access::Operation;
use crate::services::{authorize, ReportAnimalRequest, UpdateAnimalRequest};

/// Empty string clears an optional field
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub async fn list_animals(state: &AppState) -> CommandResult<Vec<AnimalDto>> {
    let session = state.session.current();
    let animals = state.animal_service.list(session.as_ref())?;

    Ok(animals.into_iter().map(AnimalDto::from).collect())
}

pub async fn get_animal(state: &AppState, animal_id: String) -> CommandResult<Option<AnimalDto>> {
    let id = parse_id(&animal_id, "animal")?;
    let session = state.session.current();

    let animal = state.animal_service.get(session.as_ref(), id)?;
    Ok(animal.map(AnimalDto::from))
}

pub async fn report_animal(state: &AppState, dto: ReportAnimalDto) -> CommandResult<AnimalDto> {
    let session = state.session.current();

    let animal = state.animal_service.report(
        session.as_ref(),
        ReportAnimalRequest {
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            photo: clearable(dto.photo).flatten(),
            location: clearable(dto.location).flatten(),
        },
    )?;

    Ok(AnimalDto::from(animal))
}

pub async fn update_animal(
    state: &AppState,
    animal_id: String,
    dto: UpdateAnimalDto,
) -> CommandResult<AnimalDto> {
    let id = parse_id(&animal_id, "animal")?;
    let session = state.session.current();

    let animal = state.animal_service.update(
        session.as_ref(),
        UpdateAnimalRequest {
            animal_id: id,
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description.map(|d| d.trim().to_string()),
            photo: clearable(dto.photo),
            location: clearable(dto.location),
        },
    )?;

    Ok(AnimalDto::from(animal))
}

/// Returns how many adoption requests were removed with the animal
pub async fn delete_animal(state: &AppState, animal_id: String) -> CommandResult<usize> {
    let id = parse_id(&animal_id, "animal")?;
    let session = state.session.current();

    Ok(state.animal_service.delete(session.as_ref(), id)?)
}

/// Live animal list; first snapshot is immediate
pub async fn subscribe_animals(state: &AppState) -> CommandResult<AnimalFeed> {
    let session = state.session.current();
    authorize(session.as_ref(), Operation::ListAnimals)?;

    Ok(AnimalFeed::new(state.animal_feed.subscribe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{sign_up, sign_out};
    use crate::application::dto::SignUpDto;
    use crate::application::error_handling::ErrorType;
    use crate::config::AppConfig;

    async fn signed_in(role: &str) -> AppState {
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

    fn report(name: &str) -> ReportAnimalDto {
        ReportAnimalDto {
            name: name.to_string(),
            description: "Found by the river".to_string(),
            photo: Some("file:///rex.jpg".to_string()),
            location: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_report_update_delete() {
        let state = signed_in("admin").await;

        let animal = report_animal(&state, report("Rex")).await.unwrap();
        assert_eq!(animal.status, "Available");
        assert_eq!(animal.location, None);

        let updated = update_animal(
            &state,
            animal.id.clone(),
            UpdateAnimalDto {
                name: Some("Max".to_string()),
                photo: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Max");
        assert_eq!(updated.photo, None);

        assert_eq!(list_animals(&state).await.unwrap().len(), 1);
        assert_eq!(delete_animal(&state, animal.id).await.unwrap(), 0);
        assert!(list_animals(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_cannot_report() {
        let state = signed_in("user").await;

        let err = report_animal(&state, report("Rex")).await.unwrap_err();

        assert_eq!(err.error_type, ErrorType::Forbidden);
    }

    #[tokio::test]
    async fn test_signed_out_cannot_list() {
        let state = signed_in("user").await;
        sign_out(&state).await.unwrap();

        let err = list_animals(&state).await.unwrap_err();

        assert_eq!(err.error_type, ErrorType::Authentication);
    }

    #[tokio::test]
    async fn test_bad_id_is_validation_error() {
        let state = signed_in("admin").await;

        let err = get_animal(&state, "not-a-uuid".to_string()).await.unwrap_err();

        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_feed_sees_new_report() {
        let state = signed_in("admin").await;
        let mut feed = subscribe_animals(&state).await.unwrap();

        assert!(feed.next().await.unwrap().is_empty());

        report_animal(&state, report("Rex")).await.unwrap();

        let snapshot = feed.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Rex");
    }
}
