use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifecycle::LifecycleAction;
use crate::domain::{DomainError, DomainResult};

/// A user's request to adopt one animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionRequest {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Reference to the requested Animal
    pub animal_id: Uuid,

    /// Account that filed the request; ownership is decided by this
    pub requester_id: Uuid,

    /// Display name or account email of the requester, for display only
    pub requester: String,

    pub status: RequestStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Decision state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl AdoptionRequest {
    /// New requests are always Pending
    pub fn new(animal_id: Uuid, requester_id: Uuid, requester: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            animal_id,
            requester_id,
            requester,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the administrator's decision
    /// A request is decided exactly once
    pub fn decide(&mut self, accepted: bool) -> DomainResult<()> {
        let next = LifecycleAction::from_decision(accepted)
            .apply(Some(self.status))
            .map_err(|e| match e {
                DomainError::InvalidStateTransition(reason) => DomainError::InvalidStateTransition(
                    format!("Adoption request {}: {}", self.id, reason),
                ),
                other => other,
            })?;

        if let Some(status) = next {
            self.status = status;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id
    }
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Declined => "Declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(RequestStatus::Pending),
            "Accepted" => Some(RequestStatus::Accepted),
            "Declined" => Some(RequestStatus::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
