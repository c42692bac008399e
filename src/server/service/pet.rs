use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        file::EntityType,
        pet::{CreatePetDto, MedicalRecordDto, PetDto, UpdatePetDto, VaccinationDto},
    },
    server::{
        data::{pet::PetRepository, user::UserRepository},
        error::AppError,
        model::{
            file::FileTarget,
            pet::{
                validate_medical_record, validate_vaccination, CreatePetParams, Pet, PetFilter,
                UpdatePetParams,
            },
            user::User,
        },
        service::{file::FileService, storage::ObjectStorage},
        util::{
            pagination::{Page, PageRequest},
            validate::Validator,
        },
    },
};

pub struct PetService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn ObjectStorage,
}

impl<'a> PetService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn ObjectStorage) -> Self {
        Self { db, storage }
    }

    /// Creates a pet owned by the caller.
    ///
    /// Admins may create a pet for another user by setting `owner_id`; the field is
    /// ignored for everyone else.
    ///
    /// # Returns
    /// - `Ok(Pet)` - Created pet
    /// - `Err(AppError::ValidationErr)` - Payload invalid
    /// - `Err(AppError::NotFound)` - Admin named an owner that does not exist
    pub async fn create(&self, caller: &User, dto: CreatePetDto) -> Result<Pet, AppError> {
        let owner_id = match dto.owner_id {
            Some(owner_id) if caller.is_admin() && owner_id != caller.id => {
                UserRepository::new(self.db)
                    .find_by_id(owner_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("User {} not found", owner_id)))?;
                owner_id
            }
            _ => caller.id,
        };

        let params = CreatePetParams::from_dto(owner_id, dto, Utc::now().date_naive())?;
        let pet = PetRepository::new(self.db).create(params).await?;

        tracing::info!("User {} created pet {} for owner {}", caller.id, pet.id, owner_id);

        Ok(pet)
    }

    /// Lists active pets, newest first.
    ///
    /// Non-admins only ever see their own pets; admins may filter by owner.
    pub async fn get_paginated(
        &self,
        caller: &User,
        mut filter: PetFilter,
        page: PageRequest,
    ) -> Result<Page<Pet>, AppError> {
        if !caller.is_admin() {
            filter.owner_id = Some(caller.id);
        }

        let (pets, total) = PetRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Page::new(pets, total, page))
    }

    /// Gets a pet with its image URLs.
    ///
    /// # Access Control
    /// - Owner of the pet or admin
    pub async fn get(&self, caller: &User, id: i32) -> Result<PetDto, AppError> {
        let pet = self.find_accessible(caller, id).await?;

        let images = FileService::new(self.db, self.storage)
            .entity_images(&FileTarget {
                entity_type: EntityType::Pet,
                entity_id: pet.id,
                owner_id: pet.owner_id,
            })
            .await;

        Ok(pet.into_dto(images))
    }

    pub async fn update(&self, caller: &User, id: i32, dto: UpdatePetDto) -> Result<Pet, AppError> {
        self.find_accessible(caller, id).await?;
        let params = UpdatePetParams::from_dto(dto, Utc::now().date_naive())?;

        PetRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| pet_not_found(id))
    }

    /// Soft deletes a pet; it disappears from every read.
    pub async fn delete(&self, caller: &User, id: i32) -> Result<(), AppError> {
        self.find_accessible(caller, id).await?;

        if !PetRepository::new(self.db).deactivate(id).await? {
            return Err(pet_not_found(id));
        }

        tracing::info!("User {} deleted pet {}", caller.id, id);

        Ok(())
    }

    pub async fn add_vaccination(
        &self,
        caller: &User,
        id: i32,
        vaccination: VaccinationDto,
    ) -> Result<Pet, AppError> {
        self.find_accessible(caller, id).await?;

        let mut v = Validator::new();
        validate_vaccination(&mut v, &vaccination);
        v.finish()?;

        PetRepository::new(self.db)
            .add_vaccination(id, vaccination)
            .await?
            .ok_or_else(|| pet_not_found(id))
    }

    pub async fn add_medical_record(
        &self,
        caller: &User,
        id: i32,
        record: MedicalRecordDto,
    ) -> Result<Pet, AppError> {
        self.find_accessible(caller, id).await?;

        let mut v = Validator::new();
        validate_medical_record(&mut v, &record);
        v.finish()?;

        PetRepository::new(self.db)
            .add_medical_record(id, record)
            .await?
            .ok_or_else(|| pet_not_found(id))
    }

    /// Loads an active pet the caller may act on.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Pet missing or deleted
    /// - `Err(AppError::Forbidden)` - Caller is neither the owner nor an admin
    async fn find_accessible(&self, caller: &User, id: i32) -> Result<Pet, AppError> {
        let pet = PetRepository::new(self.db)
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| pet_not_found(id))?;

        if !caller.owns_or_admin(pet.owner_id) {
            return Err(AppError::Forbidden(
                "You may only access your own pets".to_string(),
            ));
        }

        Ok(pet)
    }
}

fn pet_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Pet {} not found", id))
}
