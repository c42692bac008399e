//! Pet domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::pet::{
        CreatePetDto, Gender, MedicalRecordDto, PaginatedPetsDto, PetDto, Species, UpdatePetDto,
        VaccinationDto,
    },
    server::{
        error::validation::ValidationError,
        model::{clean, file::EntityImages, parse_column, parse_json},
        util::{pagination::Page, validate::Validator},
    },
};

const MAX_NAME_LENGTH: usize = 50;

/// A pet with its health records.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
    pub medical_history: Vec<MedicalRecordDto>,
    pub vaccinations: Vec<VaccinationDto>,
    /// Soft delete flag; inactive pets are invisible to reads.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Converts an entity model to a pet domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Pet)` - Converted pet
    /// - `Err(DbErr::Custom)` - Stored species, gender or health records are malformed
    pub fn from_entity(entity: entity::pet::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            species: parse_column("pet.species", &entity.species)?,
            breed: entity.breed,
            gender: parse_column("pet.gender", &entity.gender)?,
            date_of_birth: entity.date_of_birth,
            weight_kg: entity.weight_kg,
            color: entity.color,
            microchip_id: entity.microchip_id,
            special_needs: entity.special_needs,
            medical_history: parse_json("pet.medical_history", entity.medical_history)?,
            vaccinations: parse_json("pet.vaccinations", entity.vaccinations)?,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts to a DTO; `images` are attached on single-pet reads and empty in listings.
    pub fn into_dto(self, images: EntityImages) -> PetDto {
        PetDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            weight_kg: self.weight_kg,
            color: self.color,
            microchip_id: self.microchip_id,
            special_needs: self.special_needs,
            medical_history: self.medical_history,
            vaccinations: self.vaccinations,
            is_active: self.is_active,
            profile_image_url: images.primary,
            image_urls: images.gallery,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePetParams {
    pub owner_id: i32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
    pub medical_history: Vec<MedicalRecordDto>,
    pub vaccinations: Vec<VaccinationDto>,
}

impl CreatePetParams {
    /// Validates a create payload for the resolved owner.
    pub fn from_dto(
        owner_id: i32,
        dto: CreatePetDto,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        validate_name(&mut v, Some(&dto.name));
        validate_body(&mut v, dto.date_of_birth, dto.weight_kg, today);
        for vaccination in &dto.vaccinations {
            validate_vaccination(&mut v, vaccination);
        }
        for record in &dto.medical_history {
            validate_medical_record(&mut v, record);
        }
        v.finish()?;

        Ok(Self {
            owner_id,
            name: dto.name.trim().to_string(),
            species: dto.species,
            breed: clean(dto.breed),
            gender: dto.gender.unwrap_or_default(),
            date_of_birth: dto.date_of_birth,
            weight_kg: dto.weight_kg,
            color: clean(dto.color),
            microchip_id: clean(dto.microchip_id),
            special_needs: clean(dto.special_needs),
            medical_history: dto.medical_history,
            vaccinations: dto.vaccinations,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePetParams {
    pub name: Option<String>,
    pub species: Option<Species>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
}

impl UpdatePetParams {
    pub fn from_dto(dto: UpdatePetDto, today: NaiveDate) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        validate_name(&mut v, dto.name.as_deref());
        validate_body(&mut v, dto.date_of_birth, dto.weight_kg, today);
        v.finish()?;

        Ok(Self {
            name: dto.name.map(|n| n.trim().to_string()),
            species: dto.species,
            breed: dto.breed,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            weight_kg: dto.weight_kg,
            color: dto.color,
            microchip_id: dto.microchip_id,
            special_needs: dto.special_needs,
        })
    }
}

/// Listing filters. `owner_id` is forced to the caller for non-admins.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub owner_id: Option<i32>,
    pub species: Option<Species>,
}

pub fn validate_vaccination(v: &mut Validator, vaccination: &VaccinationDto) {
    v.required(&vaccination.name, "vaccinations.name").check(
        vaccination
            .next_due_on
            .is_none_or(|due| due >= vaccination.administered_on),
        "vaccinations.next_due_on",
        "Next due date must not precede the administration date",
    );
}

pub fn validate_medical_record(v: &mut Validator, record: &MedicalRecordDto) {
    v.required(&record.condition, "medical_history.condition");
}

fn validate_name(v: &mut Validator, name: Option<&str>) {
    if let Some(name) = name {
        v.required(name, "name").check(
            name.trim().chars().count() <= MAX_NAME_LENGTH,
            "name",
            "Name must be at most 50 characters",
        );
    }
}

fn validate_body(
    v: &mut Validator,
    date_of_birth: Option<NaiveDate>,
    weight_kg: Option<f64>,
    today: NaiveDate,
) {
    v.check(
        date_of_birth.is_none_or(|d| d <= today),
        "date_of_birth",
        "Date of birth cannot be in the future",
    )
    .check(
        weight_kg.is_none_or(|w| w > 0.0 && w.is_finite()),
        "weight_kg",
        "Weight must be a positive number",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn create_dto() -> CreatePetDto {
        CreatePetDto {
            owner_id: None,
            name: " Biscuit ".to_string(),
            species: Species::Dog,
            breed: Some("".to_string()),
            gender: None,
            date_of_birth: NaiveDate::from_ymd_opt(2020, 5, 1),
            weight_kg: Some(12.5),
            color: None,
            microchip_id: None,
            special_needs: None,
            medical_history: Vec::new(),
            vaccinations: Vec::new(),
        }
    }

    #[test]
    fn trims_and_defaults_fields() {
        let params = CreatePetParams::from_dto(7, create_dto(), today()).unwrap();

        assert_eq!(params.owner_id, 7);
        assert_eq!(params.name, "Biscuit");
        assert_eq!(params.breed, None);
        assert_eq!(params.gender, Gender::Unknown);
    }

    #[test]
    fn rejects_future_birth_date_and_negative_weight() {
        let dto = CreatePetDto {
            date_of_birth: NaiveDate::from_ymd_opt(2027, 1, 1),
            weight_kg: Some(-1.0),
            ..create_dto()
        };

        let err = CreatePetParams::from_dto(7, dto, today()).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["date_of_birth", "weight_kg"]);
    }
}

impl Page<Pet> {
    /// Listing pages carry no image URLs; they are resolved on single-pet reads.
    pub fn into_dto(self) -> PaginatedPetsDto {
        let page = self.map(|pet| pet.into_dto(EntityImages::default()));

        PaginatedPetsDto {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}
