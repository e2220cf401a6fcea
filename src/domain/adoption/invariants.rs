use super::entity::AdoptionRequest;
use crate::domain::{DomainError, DomainResult};

/// Validates all AdoptionRequest invariants
pub fn validate_adoption_request(request: &AdoptionRequest) -> DomainResult<()> {
    if request.requester.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Adoption requester cannot be empty".to_string(),
        ));
    }
    if request.updated_at < request.created_at {
        return Err(DomainError::InvariantViolation(format!(
            "Request {} updated before it was created",
            request.id
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the AdoptionRequest domain:
///
/// 1. A request always references exactly one animal
/// 2. A request is created Pending
/// 3. Pending moves to Accepted or Declined exactly once
/// 4. Requester identity is never empty

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::RequestStatus;
    use uuid::Uuid;

    #[test]
    fn test_new_request_is_pending_and_valid() {
        let request = AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4(), "bob".to_string());
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(validate_adoption_request(&request).is_ok());
    }

    #[test]
    fn test_empty_requester_fails() {
        let request = AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4(), " ".to_string());
        assert!(validate_adoption_request(&request).is_err());
    }

    #[test]
    fn test_decide_once() {
        let mut request = AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4(), "bob".to_string());
        request.decide(true).unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);

        let second = request.decide(false);
        assert!(matches!(second, Err(DomainError::InvalidStateTransition(_))));
        assert_eq!(request.status, RequestStatus::Accepted);
    }

    #[test]
    fn test_decline() {
        let mut request = AdoptionRequest::new(Uuid::new_v4(), Uuid::new_v4(), "bob".to_string());
        request.decide(false).unwrap();
        assert_eq!(request.status, RequestStatus::Declined);
        assert!(!request.is_pending());
    }

    #[test]
    fn test_ownership_follows_account_not_name() {
        let bob = Uuid::new_v4();
        let namesake = Uuid::new_v4();
        let request = AdoptionRequest::new(Uuid::new_v4(), bob, "bob".to_string());

        assert!(request.is_owned_by(bob));
        assert!(!request.is_owned_by(namesake));
    }
}
