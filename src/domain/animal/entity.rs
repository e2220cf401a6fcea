use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reported stray or rescue animal
/// Status is denormalized from the animal's adoption requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Internal immutable identifier
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Photo reference (URI), chosen on the device
    pub photo: Option<String>,

    /// Where the animal was found
    pub location: Option<String>,

    /// Adoption status, kept in sync by the adoption lifecycle
    pub status: AnimalStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Adoption status of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Pending Adoption")]
    PendingAdoption,
    #[serde(rename = "Adopted")]
    Adopted,
}

impl Animal {
    /// Create a new report
    /// Every new report starts out Available
    pub fn new(name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            photo: None,
            location: None,
            status: AnimalStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Edit the reported details
    /// Status is never touched here; only the adoption lifecycle moves it
    pub fn update_details(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        photo: Option<Option<String>>,
        location: Option<Option<String>>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(photo) = photo {
            self.photo = photo;
        }
        if let Some(location) = location {
            self.location = location;
        }

        self.updated_at = Utc::now();
    }

    /// Whether a new adoption request may still be filed
    pub fn accepts_requests(&self) -> bool {
        self.status != AnimalStatus::Adopted
    }
}

impl AnimalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Available => "Available",
            AnimalStatus::PendingAdoption => "Pending Adoption",
            AnimalStatus::Adopted => "Adopted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(AnimalStatus::Available),
            "Pending Adoption" => Some(AnimalStatus::PendingAdoption),
            "Adopted" => Some(AnimalStatus::Adopted),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
