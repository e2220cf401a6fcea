// src/application/commands/adoption_commands.rs
//
// Adoption request command handlers

use crate::application::commands::parse_id;
use crate::application::dto::{AdoptionRequestDto, RespondToRequestDto};
use crate::application::error_handling::CommandResult;
use crate::application::feeds::AdoptionRequestFeed;
use crate::application::state::AppState;
use crate::domain::access::Operation;
use crate::domain::adoption::AdoptionRequest;
use crate::services::{authorize, AdoptionRequestView, WithdrawOutcome, UNKNOWN_ANIMAL_NAME};

fn to_dto(state: &AppState, request: AdoptionRequest) -> AdoptionRequestDto {
    let animal_name = state
        .animal_feed
        .snapshot()
        .iter()
        .find(|animal| animal.id == request.animal_id)
        .map(|animal| animal.name.clone())
        .unwrap_or_else(|| UNKNOWN_ANIMAL_NAME.to_string());

    AdoptionRequestDto::from(AdoptionRequestView {
        request,
        animal_name,
    })
}

pub async fn submit_adoption_request(
    state: &AppState,
    animal_id: String,
) -> CommandResult<AdoptionRequestDto> {
    let id = parse_id(&animal_id, "animal")?;
    let session = state.session.current();

    let request = state.adoption_service.submit(session.as_ref(), id)?;
    Ok(to_dto(state, request))
}

pub async fn respond_to_adoption_request(
    state: &AppState,
    dto: RespondToRequestDto,
) -> CommandResult<AdoptionRequestDto> {
    let id = parse_id(&dto.request_id, "request")?;
    let session = state.session.current();

    let request = state
        .adoption_service
        .respond(session.as_ref(), id, dto.accepted)?;
    Ok(to_dto(state, request))
}

/// A missing request is reported in the outcome, not as an error
pub async fn withdraw_adoption_request(
    state: &AppState,
    request_id: String,
) -> CommandResult<WithdrawOutcome> {
    let id = parse_id(&request_id, "request")?;
    let session = state.session.current();

    Ok(state.adoption_service.withdraw(session.as_ref(), id)?)
}

pub async fn list_adoption_requests(state: &AppState) -> CommandResult<Vec<AdoptionRequestDto>> {
    let session = state.session.current();
    let views = state.adoption_service.visible_requests(session.as_ref())?;

    Ok(views.into_iter().map(AdoptionRequestDto::from).collect())
}

/// Live request list for the current session
pub async fn subscribe_adoption_requests(state: &AppState) -> CommandResult<AdoptionRequestFeed> {
    let session = state.session.current();
    let operation = match &session {
        Some(s) if s.is_admin() => Operation::ViewAllRequests,
        _ => Operation::ViewOwnRequests,
    };
    let session = authorize(session.as_ref(), operation)?.clone();

    Ok(AdoptionRequestFeed::new(
        session,
        state.request_feed.subscribe(),
        state.animal_feed.clone(),
    ))
}
