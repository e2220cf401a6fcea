// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// RULES:
// - Events are facts, not commands
// - Events are emitted only after the write committed
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::animal::AnimalStatus;
use crate::domain::user::Role;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// ANIMAL EVENTS
// ============================================================================

/// Emitted when a new animal report is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalReported {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub animal_id: Uuid,
    pub name: String,
}

impl AnimalReported {
    pub fn new(animal_id: Uuid, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            animal_id,
            name,
        }
    }
}

impl DomainEvent for AnimalReported {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AnimalReported" }
}

/// Emitted when an animal's details are edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub animal_id: Uuid,
}

impl AnimalUpdated {
    pub fn new(animal_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            animal_id,
        }
    }
}

impl DomainEvent for AnimalUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AnimalUpdated" }
}

/// Emitted when an animal and its requests are removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub animal_id: Uuid,
    pub removed_requests: usize,
}

impl AnimalDeleted {
    pub fn new(animal_id: Uuid, removed_requests: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            animal_id,
            removed_requests,
        }
    }
}

impl DomainEvent for AnimalDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AnimalDeleted" }
}

// ============================================================================
// ADOPTION EVENTS
// ============================================================================

/// Emitted when a request is filed and its animal moved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub animal_id: Uuid,
    pub requester: String,
    pub animal_status: AnimalStatus,
}

impl AdoptionRequested {
    pub fn new(
        request_id: Uuid,
        animal_id: Uuid,
        requester: String,
        animal_status: AnimalStatus,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            animal_id,
            requester,
            animal_status,
        }
    }
}

impl DomainEvent for AdoptionRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdoptionRequested" }
}

/// Emitted when an administrator accepts or declines a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionResponded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub animal_id: Uuid,
    pub accepted: bool,
    /// `None` if the animal was already gone
    pub animal_status: Option<AnimalStatus>,
}

impl AdoptionResponded {
    pub fn new(
        request_id: Uuid,
        animal_id: Uuid,
        accepted: bool,
        animal_status: Option<AnimalStatus>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            animal_id,
            accepted,
            animal_status,
        }
    }
}

impl DomainEvent for AdoptionResponded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdoptionResponded" }
}

/// Emitted when a request is deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionWithdrawn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub animal_id: Uuid,
    pub withdrawn_by: Uuid,
    pub animal_status: Option<AnimalStatus>,
}

impl AdoptionWithdrawn {
    pub fn new(
        request_id: Uuid,
        animal_id: Uuid,
        withdrawn_by: Uuid,
        animal_status: Option<AnimalStatus>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            animal_id,
            withdrawn_by,
            animal_status,
        }
    }
}

impl DomainEvent for AdoptionWithdrawn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AdoptionWithdrawn" }
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignedUp {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub role: Role,
}

impl UserSignedUp {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            role,
        }
    }
}

impl DomainEvent for UserSignedUp {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserSignedUp" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub role: Role,
}

impl UserSignedIn {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            role,
        }
    }
}

impl DomainEvent for UserSignedIn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserSignedIn" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignedOut {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl UserSignedOut {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl DomainEvent for UserSignedOut {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserSignedOut" }
}
