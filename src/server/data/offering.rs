//! Repository for the services businesses offer.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    model::{
        offering::{CreateOfferingParams, Offering, OfferingFilter, UpdateOfferingParams},
        to_json,
    },
    util::pagination::PageRequest,
};

pub struct OfferingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OfferingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateOfferingParams) -> Result<Offering, DbErr> {
        let now = Utc::now();
        let entity = entity::service::ActiveModel {
            business_id: ActiveValue::Set(params.business_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category.as_str().to_string()),
            price: ActiveValue::Set(params.price),
            duration_minutes: ActiveValue::Set(params.duration_minutes),
            availability: ActiveValue::Set(to_json(&params.availability)),
            requirements: ActiveValue::Set(to_json(&params.requirements)),
            max_pets: ActiveValue::Set(params.max_pets),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Offering::from_entity(entity)
    }

    /// Finds an active service by id.
    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<Offering>, DbErr> {
        self.find_active_entity(id)
            .await?
            .map(Offering::from_entity)
            .transpose()
    }

    /// Finds a service by id regardless of active state.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Offering>, DbErr> {
        entity::prelude::Service::find_by_id(id)
            .one(self.db)
            .await?
            .map(Offering::from_entity)
            .transpose()
    }

    /// Gets active services matching the filter, cheapest first.
    pub async fn get_paginated(
        &self,
        filter: OfferingFilter,
        page: PageRequest,
    ) -> Result<(Vec<Offering>, u64), DbErr> {
        let mut query =
            entity::prelude::Service::find().filter(entity::service::Column::IsActive.eq(true));

        if let Some(business_id) = filter.business_id {
            query = query.filter(entity::service::Column::BusinessId.eq(business_id));
        }
        if let Some(category) = filter.category {
            query = query.filter(entity::service::Column::Category.eq(category.as_str()));
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(entity::service::Column::Price.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(entity::service::Column::Price.lte(max_price));
        }

        let paginator = query
            .order_by_asc(entity::service::Column::Price)
            .order_by_asc(entity::service::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let offerings = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Offering::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((offerings, total))
    }

    /// All active services of a business, by name.
    pub async fn find_active_by_business(&self, business_id: i32) -> Result<Vec<Offering>, DbErr> {
        entity::prelude::Service::find()
            .filter(entity::service::Column::BusinessId.eq(business_id))
            .filter(entity::service::Column::IsActive.eq(true))
            .order_by_asc(entity::service::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Offering::from_entity)
            .collect()
    }

    /// Applies a partial update to an active service.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateOfferingParams,
    ) -> Result<Option<Offering>, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::service::ActiveModel = entity.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = params.category {
            active.category = ActiveValue::Set(category.as_str().to_string());
        }
        if let Some(price) = params.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(duration_minutes) = params.duration_minutes {
            active.duration_minutes = ActiveValue::Set(duration_minutes);
        }
        if let Some(availability) = params.availability {
            active.availability = ActiveValue::Set(to_json(&availability));
        }
        if let Some(requirements) = params.requirements {
            active.requirements = ActiveValue::Set(to_json(&requirements));
        }
        if let Some(max_pets) = params.max_pets {
            active.max_pets = ActiveValue::Set(max_pets);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Offering::from_entity(active.update(self.db).await?)?))
    }

    /// Soft deletes a service.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let Some(entity) = self.find_active_entity(id).await? else {
            return Ok(false);
        };

        let mut active: entity::service::ActiveModel = entity.into();
        active.is_active = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(true)
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Service::find()
            .filter(entity::service::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    async fn find_active_entity(&self, id: i32) -> Result<Option<entity::service::Model>, DbErr> {
        entity::prelude::Service::find_by_id(id)
            .filter(entity::service::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }
}
