// src/domain/adoption/lifecycle.rs
//
// Adoption request lifecycle and the animal status it implies.
//
// Every transition on a request has a paired write on its animal. The
// animal's status is a function of the statuses of its remaining requests,
// evaluated after the transition.

use serde::{Deserialize, Serialize};

use super::entity::RequestStatus;
use crate::domain::animal::AnimalStatus;
use crate::domain::{DomainError, DomainResult};

/// Transitions an adoption request can go through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Submit,
    Accept,
    Decline,
    Withdraw,
}

impl LifecycleAction {
    pub fn from_decision(accepted: bool) -> Self {
        if accepted {
            LifecycleAction::Accept
        } else {
            LifecycleAction::Decline
        }
    }

    /// Request status after the action, `None` once the request is removed
    ///
    /// `current` is `None` for a request that does not exist yet. Only a
    /// Pending request can be decided.
    pub fn apply(self, current: Option<RequestStatus>) -> DomainResult<Option<RequestStatus>> {
        match (self, current) {
            (LifecycleAction::Submit, None) => Ok(Some(RequestStatus::Pending)),
            (LifecycleAction::Accept, Some(RequestStatus::Pending)) => {
                Ok(Some(RequestStatus::Accepted))
            }
            (LifecycleAction::Decline, Some(RequestStatus::Pending)) => {
                Ok(Some(RequestStatus::Declined))
            }
            (LifecycleAction::Withdraw, Some(_)) => Ok(None),
            (action, Some(status)) => Err(DomainError::InvalidStateTransition(format!(
                "{:?} is not allowed on a request that is already {}",
                action, status
            ))),
            (action, None) => Err(DomainError::InvalidStateTransition(format!(
                "{:?} needs an existing request",
                action
            ))),
        }
    }
}

/// The animal status implied by the statuses of all its requests
///
/// Accepted wins over Pending; with neither the animal is Available.
pub fn derive_animal_status(statuses: &[RequestStatus]) -> AnimalStatus {
    if statuses.contains(&RequestStatus::Accepted) {
        AnimalStatus::Adopted
    } else if statuses.contains(&RequestStatus::Pending) {
        AnimalStatus::PendingAdoption
    } else {
        AnimalStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [LifecycleAction; 4] = [
        LifecycleAction::Submit,
        LifecycleAction::Accept,
        LifecycleAction::Decline,
        LifecycleAction::Withdraw,
    ];

    #[test]
    fn test_no_requests_means_available() {
        assert_eq!(derive_animal_status(&[]), AnimalStatus::Available);
    }

    #[test]
    fn test_transition_table() {
        let sole_request_outcome = |action: LifecycleAction, current| {
            let remaining: Vec<RequestStatus> =
                action.apply(current).unwrap().into_iter().collect();
            derive_animal_status(&remaining)
        };

        assert_eq!(
            sole_request_outcome(LifecycleAction::Submit, None),
            AnimalStatus::PendingAdoption
        );
        let pending = Some(RequestStatus::Pending);
        assert_eq!(sole_request_outcome(LifecycleAction::Accept, pending), AnimalStatus::Adopted);
        assert_eq!(sole_request_outcome(LifecycleAction::Decline, pending), AnimalStatus::Available);
        for current in [RequestStatus::Pending, RequestStatus::Accepted, RequestStatus::Declined] {
            assert_eq!(
                sole_request_outcome(LifecycleAction::Withdraw, Some(current)),
                AnimalStatus::Available
            );
        }
    }

    #[test]
    fn test_decided_request_cannot_be_decided_again() {
        for action in [LifecycleAction::Accept, LifecycleAction::Decline] {
            for current in [RequestStatus::Accepted, RequestStatus::Declined] {
                assert!(matches!(
                    action.apply(Some(current)),
                    Err(DomainError::InvalidStateTransition(_))
                ));
            }
        }
    }

    #[test]
    fn test_actions_need_the_right_starting_point() {
        assert!(LifecycleAction::Submit.apply(Some(RequestStatus::Pending)).is_err());
        for action in ALL_ACTIONS.into_iter().filter(|a| *a != LifecycleAction::Submit) {
            assert!(action.apply(None).is_err(), "{:?} without a request", action);
        }
    }

    #[test]
    fn test_accepted_wins_over_pending() {
        let statuses = [RequestStatus::Pending, RequestStatus::Accepted];
        assert_eq!(derive_animal_status(&statuses), AnimalStatus::Adopted);
    }

    #[test]
    fn test_pending_outlives_a_declined_sibling() {
        let statuses = [RequestStatus::Declined, RequestStatus::Pending];
        assert_eq!(derive_animal_status(&statuses), AnimalStatus::PendingAdoption);
    }

    #[test]
    fn test_only_declined_means_available() {
        let statuses = [RequestStatus::Declined, RequestStatus::Declined];
        assert_eq!(derive_animal_status(&statuses), AnimalStatus::Available);
    }

    #[test]
    fn test_from_decision() {
        assert_eq!(LifecycleAction::from_decision(true), LifecycleAction::Accept);
        assert_eq!(LifecycleAction::from_decision(false), LifecycleAction::Decline);
    }
}
