// src/services/adoption_service.rs
//
// Adoption request lifecycle: submit, respond, withdraw.
//
// Each operation is role-gated first, then validated, then written through a
// repository call that keeps the request and its animal in one transaction.
// Events go out only after the transaction committed.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::access::{permits, Operation};
use crate::domain::adoption::{
    derive_animal_status, validate_adoption_request, AdoptionRequest, LifecycleAction,
};
use crate::domain::animal::{Animal, AnimalStatus};
use crate::domain::user::Session;
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{AdoptionRequested, AdoptionResponded, AdoptionWithdrawn, EventBus};
use crate::repositories::{AdoptionRequestRepository, AnimalRepository, DecisionOutcome};
use crate::services::authorization::authorize;

/// Name shown for a request whose animal has been removed
pub const UNKNOWN_ANIMAL_NAME: &str = "Unknown";

/// Result of a withdraw call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WithdrawOutcome {
    Withdrawn {
        request_id: Uuid,
        animal_id: Uuid,
        animal_status: Option<AnimalStatus>,
    },
    /// Nothing to withdraw; no writes were made
    NotFound,
}

/// A request row as the requests screen shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionRequestView {
    pub request: AdoptionRequest,
    pub animal_name: String,
}

/// Stored animal status compared with the one its requests imply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalStatusAudit {
    pub animal_id: Uuid,
    pub stored: AnimalStatus,
    pub derived: AnimalStatus,
    pub request_count: usize,
}

impl AnimalStatusAudit {
    pub fn is_consistent(&self) -> bool {
        self.stored == self.derived
    }
}

/// Join requests to their animals' names
pub fn join_with_animals(
    requests: &[AdoptionRequest],
    animals: &[Animal],
) -> Vec<AdoptionRequestView> {
    let names: HashMap<Uuid, &str> = animals
        .iter()
        .map(|animal| (animal.id, animal.name.as_str()))
        .collect();

    requests
        .iter()
        .map(|request| AdoptionRequestView {
            request: request.clone(),
            animal_name: names
                .get(&request.animal_id)
                .copied()
                .unwrap_or(UNKNOWN_ANIMAL_NAME)
                .to_string(),
        })
        .collect()
}

/// Requests the session may see: all for admins, own for users
pub fn visible_to<'a>(
    session: &Session,
    requests: impl IntoIterator<Item = &'a AdoptionRequest>,
) -> Vec<AdoptionRequest> {
    let sees_all = permits(Some(session.role), Operation::ViewAllRequests);
    requests
        .into_iter()
        .filter(|request| sees_all || request.is_owned_by(session.user_id))
        .cloned()
        .collect()
}

pub struct AdoptionService {
    animal_repo: Arc<dyn AnimalRepository>,
    request_repo: Arc<dyn AdoptionRequestRepository>,
    event_bus: Arc<EventBus>,
}

impl AdoptionService {
    pub fn new(
        animal_repo: Arc<dyn AnimalRepository>,
        request_repo: Arc<dyn AdoptionRequestRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            animal_repo,
            request_repo,
            event_bus,
        }
    }

    /// File a Pending request for an animal that is not yet adopted
    pub fn submit(&self, session: Option<&Session>, animal_id: Uuid) -> AppResult<AdoptionRequest> {
        let session = authorize(session, Operation::SubmitRequest)?;

        let animal = self
            .animal_repo
            .get_by_id(animal_id)?
            .ok_or(AppError::NotFound)?;

        if !animal.accepts_requests() {
            return Err(AppError::Domain(DomainError::InvalidStateTransition(format!(
                "{} has already been adopted",
                animal.name
            ))));
        }

        let request = AdoptionRequest::new(
            animal.id,
            session.user_id,
            session.display_identity().to_string(),
        );
        validate_adoption_request(&request).map_err(AppError::from_input)?;

        let animal_status = self.request_repo.insert_and_sync(&request)?;

        log::info!(
            "{:?}: request {} by {} for animal {}, animal now {}",
            LifecycleAction::Submit,
            request.id,
            request.requester,
            animal.id,
            animal_status
        );
        self.event_bus.emit(AdoptionRequested::new(
            request.id,
            request.animal_id,
            request.requester.clone(),
            animal_status,
        ));

        Ok(request)
    }

    /// Accept or decline a Pending request
    ///
    /// The animal is taken from the stored request. A request that was
    /// decided in the meantime is an invalid state transition.
    pub fn respond(
        &self,
        session: Option<&Session>,
        request_id: Uuid,
        accepted: bool,
    ) -> AppResult<AdoptionRequest> {
        authorize(session, Operation::RespondToRequest)?;

        let mut request = self
            .request_repo
            .get_by_id(request_id)?
            .ok_or(AppError::NotFound)?;

        request.decide(accepted)?;

        let animal_status = match self.request_repo.decide_and_sync(&request)? {
            DecisionOutcome::Applied(status) => status,
            DecisionOutcome::Stale => {
                return Err(AppError::Domain(DomainError::InvalidStateTransition(format!(
                    "Adoption request {} was decided concurrently",
                    request.id
                ))));
            }
        };

        if animal_status.is_none() {
            log::warn!(
                "Request {} decided but animal {} no longer exists",
                request.id,
                request.animal_id
            );
        }

        log::info!(
            "{:?}: request {}, animal {} now {:?}",
            LifecycleAction::from_decision(accepted),
            request.id,
            request.animal_id,
            animal_status
        );
        self.event_bus.emit(AdoptionResponded::new(
            request.id,
            request.animal_id,
            accepted,
            animal_status,
        ));

        Ok(request)
    }

    /// Delete a request and release its animal
    ///
    /// Users may withdraw only their own requests; admins any.
    pub fn withdraw(&self, session: Option<&Session>, request_id: Uuid) -> AppResult<WithdrawOutcome> {
        let session = authorize(session, Operation::WithdrawOwnRequest)?;

        let request = match self.request_repo.get_by_id(request_id)? {
            Some(request) => request,
            None => {
                log::warn!("Withdraw: adoption request {} not found", request_id);
                return Ok(WithdrawOutcome::NotFound);
            }
        };

        let may_withdraw_any = permits(Some(session.role), Operation::WithdrawAnyRequest);
        if !may_withdraw_any && !request.is_owned_by(session.user_id) {
            return Err(AppError::forbidden(
                "Only the requester or an administrator may withdraw this request",
            ));
        }

        let withdrawn = match self.request_repo.delete_and_sync(request_id)? {
            Some(withdrawn) => withdrawn,
            None => {
                log::warn!("Withdraw: adoption request {} vanished", request_id);
                return Ok(WithdrawOutcome::NotFound);
            }
        };

        log::info!(
            "{:?}: request {}, animal {} now {:?}",
            LifecycleAction::Withdraw,
            withdrawn.request.id,
            withdrawn.request.animal_id,
            withdrawn.animal_status
        );
        self.event_bus.emit(AdoptionWithdrawn::new(
            withdrawn.request.id,
            withdrawn.request.animal_id,
            session.user_id,
            withdrawn.animal_status,
        ));

        Ok(WithdrawOutcome::Withdrawn {
            request_id: withdrawn.request.id,
            animal_id: withdrawn.request.animal_id,
            animal_status: withdrawn.animal_status,
        })
    }

    /// Requests shown on the requests screen, newest first
    pub fn visible_requests(&self, session: Option<&Session>) -> AppResult<Vec<AdoptionRequestView>> {
        let requests = match session {
            Some(s) if permits(Some(s.role), Operation::ViewAllRequests) => {
                self.request_repo.list_all()?
            }
            _ => {
                let session = authorize(session, Operation::ViewOwnRequests)?;
                self.request_repo.list_by_requester(session.user_id)?
            }
        };

        let animals = self.animal_repo.list_all()?;
        Ok(join_with_animals(&requests, &animals))
    }

    /// Compare an animal's stored status with the one its requests imply
    pub fn audit_animal(&self, session: Option<&Session>, animal_id: Uuid) -> AppResult<AnimalStatusAudit> {
        authorize(session, Operation::ViewAnimal)?;

        let animal = self
            .animal_repo
            .get_by_id(animal_id)?
            .ok_or(AppError::NotFound)?;
        let requests = self.request_repo.list_by_animal(animal_id)?;
        let statuses: Vec<_> = requests.iter().map(|r| r.status).collect();

        let audit = AnimalStatusAudit {
            animal_id,
            stored: animal.status,
            derived: derive_animal_status(&statuses),
            request_count: requests.len(),
        };

        if !audit.is_consistent() {
            log::warn!(
                "Animal {} is stored as {} but its requests imply {}",
                animal_id,
                audit.stored,
                audit.derived
            );
        }

        Ok(audit)
    }
}
