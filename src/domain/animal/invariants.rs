use super::entity::Animal;
use crate::domain::{DomainError, DomainResult};

/// Validates all Animal invariants
pub fn validate_animal(animal: &Animal) -> DomainResult<()> {
    validate_required("Animal name", &animal.name)?;
    validate_required("Animal description", &animal.description)?;
    validate_optional("Photo reference", animal.photo.as_deref())?;
    Ok(())
}

fn validate_required(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Optional fields may be absent, but not present-and-blank
fn validate_optional(field: &str, value: Option<&str>) -> DomainResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => Err(DomainError::InvariantViolation(format!(
            "{} cannot be blank when set",
            field
        ))),
        _ => Ok(()),
    }
}

/// Invariants that must hold true for the Animal domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Name and description are required
/// 3. New reports are Available
/// 4. Status only changes through the adoption lifecycle
/// 5. Created timestamp never changes

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::animal::AnimalStatus;

    #[test]
    fn test_valid_animal() {
        let animal = Animal::new("Biscuit".to_string(), "Brown terrier mix".to_string());
        assert!(validate_animal(&animal).is_ok());
        assert_eq!(animal.status, AnimalStatus::Available);
    }

    #[test]
    fn test_blank_name_fails() {
        let animal = Animal::new("  ".to_string(), "Brown terrier mix".to_string());
        assert!(validate_animal(&animal).is_err());
    }

    #[test]
    fn test_missing_description_fails() {
        let animal = Animal::new("Biscuit".to_string(), String::new());
        assert!(validate_animal(&animal).is_err());
    }

    #[test]
    fn test_blank_photo_fails() {
        let mut animal = Animal::new("Biscuit".to_string(), "Terrier".to_string());
        animal.update_details(None, None, Some(Some(" ".to_string())), None);
        assert!(validate_animal(&animal).is_err());
    }

    #[test]
    fn test_update_details_keeps_status() {
        let mut animal = Animal::new("Biscuit".to_string(), "Terrier".to_string());
        animal.status = AnimalStatus::PendingAdoption;
        animal.update_details(Some("Biscuit II".to_string()), None, None, None);
        assert_eq!(animal.name, "Biscuit II");
        assert_eq!(animal.status, AnimalStatus::PendingAdoption);
    }

    #[test]
    fn test_status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&AnimalStatus::PendingAdoption).unwrap();
        assert_eq!(json, "\"Pending Adoption\"");
        assert_eq!(AnimalStatus::parse("Adopted"), Some(AnimalStatus::Adopted));
        assert_eq!(AnimalStatus::parse("adopted"), None);
    }
}
