// src/events/mod.rs
//
// Internal Event System - Public API
//
// Services emit after their writes commit. Live collections listen and
// push fresh snapshots to subscribers.

pub mod bus;
pub mod live;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Adoption
    AdoptionRequested,
    AdoptionResponded,
    AdoptionWithdrawn,

    // Animal
    AnimalDeleted,
    AnimalReported,
    AnimalUpdated,

    // Session
    UserSignedIn,
    UserSignedOut,
    UserSignedUp,
};

pub use bus::{EventBus, EventLogEntry};

pub use live::{LiveCollection, Subscription};

pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
