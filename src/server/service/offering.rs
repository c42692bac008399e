use sea_orm::DatabaseConnection;

use crate::{
    model::{
        file::EntityType,
        offering::{CreateServiceDto, ServiceDto, UpdateServiceDto},
    },
    server::{
        data::{business::BusinessRepository, offering::OfferingRepository},
        error::AppError,
        model::{
            file::FileTarget,
            offering::{CreateOfferingParams, Offering, OfferingFilter, UpdateOfferingParams},
            user::User,
        },
        service::{file::FileService, storage::ObjectStorage},
        util::pagination::{Page, PageRequest},
    },
};

pub struct OfferingService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn ObjectStorage,
}

impl<'a> OfferingService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn ObjectStorage) -> Self {
        Self { db, storage }
    }

    /// Adds a service to a business.
    ///
    /// # Access Control
    /// - Owner of the business or admin
    ///
    /// # Returns
    /// - `Ok(Offering)` - Created service
    /// - `Err(AppError::NotFound)` - Business missing or deleted
    /// - `Err(AppError::Forbidden)` - Caller does not own the business
    pub async fn create(&self, caller: &User, dto: CreateServiceDto) -> Result<Offering, AppError> {
        let business = BusinessRepository::new(self.db)
            .find_active_by_id(dto.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", dto.business_id)))?;

        if !caller.owns_or_admin(business.owner_id) {
            return Err(AppError::Forbidden(
                "You may only add services to your own businesses".to_string(),
            ));
        }

        let params = CreateOfferingParams::from_dto(dto)?;
        let offering = OfferingRepository::new(self.db).create(params).await?;

        tracing::info!(
            "User {} created service {} for business {}",
            caller.id,
            offering.id,
            business.id
        );

        Ok(offering)
    }

    /// Public listing of active services, cheapest first.
    pub async fn search(
        &self,
        filter: OfferingFilter,
        page: PageRequest,
    ) -> Result<Page<Offering>, AppError> {
        let (offerings, total) = OfferingRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Page::new(offerings, total, page))
    }

    /// Gets an active service with its image URLs.
    pub async fn get(&self, id: i32) -> Result<ServiceDto, AppError> {
        let offering = self.find_active(id).await?;
        let owner_id = self.owner_of(&offering).await?;

        let images = FileService::new(self.db, self.storage)
            .entity_images(&FileTarget {
                entity_type: EntityType::Service,
                entity_id: offering.id,
                owner_id,
            })
            .await;

        Ok(offering.into_dto(images))
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i32,
        dto: UpdateServiceDto,
    ) -> Result<Offering, AppError> {
        self.find_owned(caller, id).await?;
        let params = UpdateOfferingParams::from_dto(dto)?;

        OfferingRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| service_not_found(id))
    }

    /// Soft deletes a service. Existing bookings keep referring to it.
    pub async fn delete(&self, caller: &User, id: i32) -> Result<(), AppError> {
        self.find_owned(caller, id).await?;

        if !OfferingRepository::new(self.db).deactivate(id).await? {
            return Err(service_not_found(id));
        }

        tracing::info!("User {} deleted service {}", caller.id, id);

        Ok(())
    }

    async fn find_active(&self, id: i32) -> Result<Offering, AppError> {
        OfferingRepository::new(self.db)
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| service_not_found(id))
    }

    async fn owner_of(&self, offering: &Offering) -> Result<i32, AppError> {
        BusinessRepository::new(self.db)
            .find_owner_id(offering.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", offering.business_id)))
    }

    async fn find_owned(&self, caller: &User, id: i32) -> Result<Offering, AppError> {
        let offering = self.find_active(id).await?;

        if !caller.owns_or_admin(self.owner_of(&offering).await?) {
            return Err(AppError::Forbidden(
                "You may only manage services of your own businesses".to_string(),
            ));
        }

        Ok(offering)
    }
}

fn service_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Service {} not found", id))
}
