//! Business data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    model::{
        business::{Business, CreateBusinessParams, UpdateBusinessParams},
        to_json,
    },
    util::pagination::PageRequest,
};

pub struct BusinessRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BusinessRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new active, unverified business.
    pub async fn create(&self, params: CreateBusinessParams) -> Result<Business, DbErr> {
        let now = Utc::now();
        let entity = entity::business::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            categories: ActiveValue::Set(to_json(&params.categories)),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            website: ActiveValue::Set(params.website),
            street: ActiveValue::Set(params.address.street),
            city: ActiveValue::Set(params.address.city),
            state: ActiveValue::Set(params.address.state),
            zip_code: ActiveValue::Set(params.address.zip_code),
            country: ActiveValue::Set(params.address.country),
            latitude: ActiveValue::Set(params.latitude),
            longitude: ActiveValue::Set(params.longitude),
            business_hours: ActiveValue::Set(to_json(&params.business_hours)),
            is_verified: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            average_rating: ActiveValue::Set(None),
            rating_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Business::from_entity(entity)
    }

    /// Finds an active business by id.
    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<Business>, DbErr> {
        self.find_active_entity(id)
            .await?
            .map(Business::from_entity)
            .transpose()
    }

    /// Loads every active business, optionally filtered on verification, newest first.
    ///
    /// Category, text and proximity filters need the decoded rows, so the public listing
    /// applies them after this query.
    pub async fn find_all_active(&self, verified: Option<bool>) -> Result<Vec<Business>, DbErr> {
        let mut query =
            entity::prelude::Business::find().filter(entity::business::Column::IsActive.eq(true));

        if let Some(verified) = verified {
            query = query.filter(entity::business::Column::IsVerified.eq(verified));
        }

        query
            .order_by_desc(entity::business::Column::CreatedAt)
            .order_by_desc(entity::business::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Business::from_entity)
            .collect()
    }

    /// Gets the active businesses of an owner, newest first.
    pub async fn get_by_owner_paginated(
        &self,
        owner_id: i32,
        page: PageRequest,
    ) -> Result<(Vec<Business>, u64), DbErr> {
        let paginator = entity::prelude::Business::find()
            .filter(entity::business::Column::OwnerId.eq(owner_id))
            .filter(entity::business::Column::IsActive.eq(true))
            .order_by_desc(entity::business::Column::CreatedAt)
            .order_by_desc(entity::business::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let businesses = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Business::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((businesses, total))
    }

    /// Ids of every business owned by the user, including inactive ones.
    pub async fn ids_by_owner(&self, owner_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Business::find()
            .select_only()
            .column(entity::business::Column::Id)
            .filter(entity::business::Column::OwnerId.eq(owner_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Applies a partial update to an active business.
    ///
    /// # Returns
    /// - `Ok(Some(Business))` - Updated business
    /// - `Ok(None)` - Business does not exist or was deleted
    pub async fn update(
        &self,
        id: i32,
        params: UpdateBusinessParams,
    ) -> Result<Option<Business>, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::business::ActiveModel = entity.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(categories) = params.categories {
            active.categories = ActiveValue::Set(to_json(&categories));
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(Some(email).filter(|e| !e.is_empty()));
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(website) = params.website {
            active.website = ActiveValue::Set(Some(website));
        }
        if let Some(address) = params.address {
            active.street = ActiveValue::Set(address.street);
            active.city = ActiveValue::Set(address.city);
            active.state = ActiveValue::Set(address.state);
            active.zip_code = ActiveValue::Set(address.zip_code);
            active.country = ActiveValue::Set(address.country);
        }
        if let (Some(latitude), Some(longitude)) = (params.latitude, params.longitude) {
            active.latitude = ActiveValue::Set(Some(latitude));
            active.longitude = ActiveValue::Set(Some(longitude));
        }
        if let Some(hours) = params.business_hours {
            active.business_hours = ActiveValue::Set(to_json(&hours));
        }
        if let Some(is_verified) = params.is_verified {
            active.is_verified = ActiveValue::Set(is_verified);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Business::from_entity(active.update(self.db).await?)?))
    }

    /// Soft deletes a business.
    ///
    /// # Returns
    /// - `Ok(true)` - Business was active and is now deactivated
    /// - `Ok(false)` - Business does not exist or was already deleted
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(false);
        };

        let mut active: entity::business::ActiveModel = entity.into();
        active.is_active = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(true)
    }

    /// Sets the verification flag of a business regardless of active state.
    pub async fn set_verified(&self, id: i32, is_verified: bool) -> Result<Option<Business>, DbErr> {
        let Some(entity) = entity::prelude::Business::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::business::ActiveModel = entity.into();
        active.is_verified = ActiveValue::Set(is_verified);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Business::from_entity(active.update(self.db).await?)?))
    }

    /// Stores recomputed rating aggregates.
    pub async fn set_rating(
        &self,
        id: i32,
        average_rating: Option<f64>,
        rating_count: i32,
    ) -> Result<(), DbErr> {
        if let Some(entity) = entity::prelude::Business::find_by_id(id).one(self.db).await? {
            let mut active: entity::business::ActiveModel = entity.into();
            active.average_rating = ActiveValue::Set(average_rating);
            active.rating_count = ActiveValue::Set(rating_count);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(self.db).await?;
        }

        Ok(())
    }

    /// Finds the owner of a business regardless of active state.
    pub async fn find_owner_id(&self, id: i32) -> Result<Option<i32>, DbErr> {
        Ok(entity::prelude::Business::find_by_id(id)
            .one(self.db)
            .await?
            .map(|b| b.owner_id))
    }

    pub async fn count(&self, verified_only: bool) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Business::find();
        if verified_only {
            query = query.filter(entity::business::Column::IsVerified.eq(true));
        }

        query.count(self.db).await
    }

    async fn find_active_entity(&self, id: i32) -> Result<Option<entity::business::Model>, DbErr> {
        entity::prelude::Business::find_by_id(id)
            .filter(entity::business::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }
}
