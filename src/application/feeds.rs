// src/application/feeds.rs
//
// Per-session views over the live collections. The stored collections are
// published unfiltered; these narrow them to what the session may see.

use std::sync::Arc;

use crate::application::dto::{AdoptionRequestDto, AnimalDto};
use crate::domain::adoption::AdoptionRequest;
use crate::domain::animal::Animal;
use crate::domain::user::Session;
use crate::events::{LiveCollection, Subscription};
use crate::services::{join_with_animals, visible_to};

/// Animal list snapshots
pub struct AnimalFeed {
    animals: Subscription<Animal>,
}

impl AnimalFeed {
    pub(crate) fn new(animals: Subscription<Animal>) -> Self {
        Self { animals }
    }

    pub async fn next(&mut self) -> Option<Vec<AnimalDto>> {
        let snapshot = self.animals.next().await?;
        Some(snapshot.iter().cloned().map(AnimalDto::from).collect())
    }

    pub fn restart(&mut self) {
        self.animals.restart();
    }
}

/// Request list snapshots as the requests screen shows them
///
/// Fixed to the session it was opened with.
pub struct AdoptionRequestFeed {
    session: Session,
    requests: Subscription<AdoptionRequest>,
    animals: Arc<LiveCollection<Animal>>,
}

impl AdoptionRequestFeed {
    pub(crate) fn new(
        session: Session,
        requests: Subscription<AdoptionRequest>,
        animals: Arc<LiveCollection<Animal>>,
    ) -> Self {
        Self {
            session,
            requests,
            animals,
        }
    }

    pub async fn next(&mut self) -> Option<Vec<AdoptionRequestDto>> {
        let snapshot = self.requests.next().await?;
        let visible = visible_to(&self.session, snapshot.iter());
        let animals = self.animals.snapshot();

        Some(
            join_with_animals(&visible, &animals)
                .into_iter()
                .map(AdoptionRequestDto::from)
                .collect(),
        )
    }

    pub fn restart(&mut self) {
        self.requests.restart();
    }
}
