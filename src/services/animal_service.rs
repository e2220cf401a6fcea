// src/services/animal_service.rs
use crate::domain::access::Operation;
use crate::domain::animal::{validate_animal, Animal};
use crate::domain::user::Session;
use crate::error::{AppError, AppResult};
use crate::events::{AnimalDeleted, AnimalReported, AnimalUpdated, EventBus};
use crate::repositories::AnimalRepository;
use crate::services::authorization::authorize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ReportAnimalRequest {
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateAnimalRequest {
    pub animal_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

pub struct AnimalService {
    animal_repo: Arc<dyn AnimalRepository>,
    event_bus: Arc<EventBus>,
}

impl AnimalService {
    pub fn new(animal_repo: Arc<dyn AnimalRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            animal_repo,
            event_bus,
        }
    }

    /// File a new report; it starts out Available
    pub fn report(&self, session: Option<&Session>, request: ReportAnimalRequest) -> AppResult<Animal> {
        authorize(session, Operation::CreateAnimal)?;

        let mut animal = Animal::new(request.name, request.description);
        animal.photo = request.photo;
        animal.location = request.location;

        validate_animal(&animal).map_err(AppError::from_input)?;
        self.animal_repo.insert(&animal)?;

        log::info!("Animal {} reported: {}", animal.id, animal.name);
        self.event_bus
            .emit(AnimalReported::new(animal.id, animal.name.clone()));

        Ok(animal)
    }

    /// Edit the reported details; status is left to the adoption lifecycle
    pub fn update(&self, session: Option<&Session>, request: UpdateAnimalRequest) -> AppResult<Animal> {
        authorize(session, Operation::EditAnimal)?;

        let mut animal = self
            .animal_repo
            .get_by_id(request.animal_id)?
            .ok_or(AppError::NotFound)?;

        animal.update_details(
            request.name,
            request.description,
            request.photo,
            request.location,
        );

        validate_animal(&animal).map_err(AppError::from_input)?;
        self.animal_repo.update_details(&animal)?;

        self.event_bus.emit(AnimalUpdated::new(animal.id));
        Ok(animal)
    }

    /// Remove an animal together with its adoption requests
    pub fn delete(&self, session: Option<&Session>, animal_id: Uuid) -> AppResult<usize> {
        authorize(session, Operation::DeleteAnimal)?;

        let removed_requests = self.animal_repo.delete(animal_id)?;

        log::info!(
            "Animal {} deleted along with {} adoption requests",
            animal_id,
            removed_requests
        );
        self.event_bus
            .emit(AnimalDeleted::new(animal_id, removed_requests));

        Ok(removed_requests)
    }

    pub fn get(&self, session: Option<&Session>, animal_id: Uuid) -> AppResult<Option<Animal>> {
        authorize(session, Operation::ViewAnimal)?;
        self.animal_repo.get_by_id(animal_id)
    }

    pub fn list(&self, session: Option<&Session>) -> AppResult<Vec<Animal>> {
        authorize(session, Operation::ListAnimals)?;
        self.animal_repo.list_all()
    }
}
