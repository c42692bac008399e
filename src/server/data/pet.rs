//! Pet data repository.
//!
//! Pets are soft deleted: every read used by the API filters on `is_active`, so a
//! deactivated pet behaves as missing.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::pet::{MedicalRecordDto, VaccinationDto},
    server::{
        model::{
            pet::{CreatePetParams, Pet, PetFilter, UpdatePetParams},
            to_json,
        },
        util::pagination::PageRequest,
    },
};

pub struct PetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PetRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new active pet.
    ///
    /// # Returns
    /// - `Ok(Pet)` - The created pet
    /// - `Err(DbErr)` - Database error, including a missing owner
    pub async fn create(&self, params: CreatePetParams) -> Result<Pet, DbErr> {
        let now = Utc::now();
        let entity = entity::pet::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name),
            species: ActiveValue::Set(params.species.as_str().to_string()),
            breed: ActiveValue::Set(params.breed),
            gender: ActiveValue::Set(params.gender.as_str().to_string()),
            date_of_birth: ActiveValue::Set(params.date_of_birth),
            weight_kg: ActiveValue::Set(params.weight_kg),
            color: ActiveValue::Set(params.color),
            microchip_id: ActiveValue::Set(params.microchip_id),
            special_needs: ActiveValue::Set(params.special_needs),
            medical_history: ActiveValue::Set(to_json(&params.medical_history)),
            vaccinations: ActiveValue::Set(to_json(&params.vaccinations)),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Pet::from_entity(entity)
    }

    /// Finds an active pet by id.
    ///
    /// # Returns
    /// - `Ok(Some(Pet))` - Pet exists and is active
    /// - `Ok(None)` - Pet does not exist or was deleted
    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<Pet>, DbErr> {
        self.find_active_entity(id)
            .await?
            .map(Pet::from_entity)
            .transpose()
    }

    /// Gets active pets matching the filter, newest first.
    ///
    /// # Returns
    /// - `Ok((pets, total))` - Pets on the requested page and the total number of matches
    pub async fn get_paginated(
        &self,
        filter: PetFilter,
        page: PageRequest,
    ) -> Result<(Vec<Pet>, u64), DbErr> {
        let mut query =
            entity::prelude::Pet::find().filter(entity::pet::Column::IsActive.eq(true));

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(entity::pet::Column::OwnerId.eq(owner_id));
        }
        if let Some(species) = filter.species {
            query = query.filter(entity::pet::Column::Species.eq(species.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::pet::Column::CreatedAt)
            .order_by_desc(entity::pet::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let pets = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Pet::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((pets, total))
    }

    /// Applies a partial update to an active pet.
    ///
    /// # Returns
    /// - `Ok(Some(Pet))` - Updated pet
    /// - `Ok(None)` - Pet does not exist or was deleted
    pub async fn update(&self, id: i32, params: UpdatePetParams) -> Result<Option<Pet>, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::pet::ActiveModel = entity.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(species) = params.species {
            active.species = ActiveValue::Set(species.as_str().to_string());
        }
        if let Some(breed) = params.breed {
            active.breed = ActiveValue::Set(Some(breed));
        }
        if let Some(gender) = params.gender {
            active.gender = ActiveValue::Set(gender.as_str().to_string());
        }
        if let Some(date_of_birth) = params.date_of_birth {
            active.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(weight_kg) = params.weight_kg {
            active.weight_kg = ActiveValue::Set(Some(weight_kg));
        }
        if let Some(color) = params.color {
            active.color = ActiveValue::Set(Some(color));
        }
        if let Some(microchip_id) = params.microchip_id {
            active.microchip_id = ActiveValue::Set(Some(microchip_id));
        }
        if let Some(special_needs) = params.special_needs {
            active.special_needs = ActiveValue::Set(Some(special_needs));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Pet::from_entity(active.update(self.db).await?)?))
    }

    /// Soft deletes a pet.
    ///
    /// # Returns
    /// - `Ok(true)` - Pet was active and is now deactivated
    /// - `Ok(false)` - Pet does not exist or was already deleted
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(false);
        };

        let mut active: entity::pet::ActiveModel = entity.into();
        active.is_active = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(true)
    }

    /// Appends a vaccination record to an active pet.
    ///
    /// # Returns
    /// - `Ok(Some(Pet))` - Pet with the record appended
    /// - `Ok(None)` - Pet does not exist or was deleted
    pub async fn add_vaccination(
        &self,
        id: i32,
        vaccination: VaccinationDto,
    ) -> Result<Option<Pet>, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(None);
        };

        let pet = Pet::from_entity(entity.clone())?;
        let mut vaccinations = pet.vaccinations;
        vaccinations.push(vaccination);

        let mut active: entity::pet::ActiveModel = entity.into();
        active.vaccinations = ActiveValue::Set(to_json(&vaccinations));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Pet::from_entity(active.update(self.db).await?)?))
    }

    /// Appends a medical history record to an active pet.
    pub async fn add_medical_record(
        &self,
        id: i32,
        record: MedicalRecordDto,
    ) -> Result<Option<Pet>, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(None);
        };

        let pet = Pet::from_entity(entity.clone())?;
        let mut history = pet.medical_history;
        history.push(record);

        let mut active: entity::pet::ActiveModel = entity.into();
        active.medical_history = ActiveValue::Set(to_json(&history));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Pet::from_entity(active.update(self.db).await?)?))
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Pet::find()
            .filter(entity::pet::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    async fn find_active_entity(&self, id: i32) -> Result<Option<entity::pet::Model>, DbErr> {
        entity::prelude::Pet::find_by_id(id)
            .filter(entity::pet::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }
}
