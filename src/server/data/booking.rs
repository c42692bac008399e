//! Booking data repository.
//!
//! Besides CRUD this repository answers the slot conflict query and loads the display
//! names of the pet, service and business referenced by a page of bookings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::booking::{BookingStatus, PaymentStatus},
    server::{
        model::{
            booking::{
                Booking, BookingDetails, BookingFilter, BookingScope, CreateBookingParams,
                StatusChange, SLOT_HOLDING_STATUSES,
            },
            parse_column,
        },
        util::pagination::PageRequest,
    },
};

pub struct BookingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending, unpaid booking.
    pub async fn create(&self, params: CreateBookingParams) -> Result<Booking, DbErr> {
        let now = Utc::now();
        let entity = entity::booking::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            business_id: ActiveValue::Set(params.business_id),
            service_id: ActiveValue::Set(params.service_id),
            pet_id: ActiveValue::Set(params.pet_id),
            appointment_date_time: ActiveValue::Set(params.appointment_date_time),
            status: ActiveValue::Set(BookingStatus::Pending.as_str().to_string()),
            payment_status: ActiveValue::Set(PaymentStatus::Pending.as_str().to_string()),
            total_price: ActiveValue::Set(params.total_price),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Booking::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, DbErr> {
        entity::prelude::Booking::find_by_id(id)
            .one(self.db)
            .await?
            .map(Booking::from_entity)
            .transpose()
    }

    /// Checks whether the slot is held by a pending or confirmed booking.
    ///
    /// A slot is the exact `(service_id, appointment_date_time)` pair; overlapping
    /// durations are not considered.
    pub async fn has_conflict(
        &self,
        service_id: i32,
        appointment_date_time: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::ServiceId.eq(service_id))
            .filter(entity::booking::Column::AppointmentDateTime.eq(appointment_date_time))
            .filter(
                entity::booking::Column::Status
                    .is_in(SLOT_HOLDING_STATUSES.iter().map(|s| s.as_str())),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets bookings visible in the given scope, latest appointment first.
    ///
    /// # Returns
    /// - `Ok((bookings, total))` - Bookings on the requested page and the total number of matches
    pub async fn get_paginated(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<(Vec<Booking>, u64), DbErr> {
        let mut query = entity::prelude::Booking::find();

        match filter.scope {
            BookingScope::All => {}
            BookingScope::Owner(owner_id) => {
                query = query.filter(entity::booking::Column::OwnerId.eq(owner_id));
            }
            BookingScope::Businesses(business_ids) => {
                query = query.filter(entity::booking::Column::BusinessId.is_in(business_ids));
            }
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::booking::Column::Status.eq(status.as_str()));
        }
        if let Some(business_id) = filter.business_id {
            query = query.filter(entity::booking::Column::BusinessId.eq(business_id));
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::AppointmentDateTime)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let bookings = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Booking::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((bookings, total))
    }

    /// Attaches pet, service and business names to bookings.
    ///
    /// Issues one query per referenced table regardless of the number of bookings.
    pub async fn with_details(&self, bookings: Vec<Booking>) -> Result<Vec<BookingDetails>, DbErr> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let pet_ids: Vec<i32> = bookings.iter().map(|b| b.pet_id).collect();
        let service_ids: Vec<i32> = bookings.iter().map(|b| b.service_id).collect();
        let business_ids: Vec<i32> = bookings.iter().map(|b| b.business_id).collect();

        let pet_names: HashMap<i32, String> = entity::prelude::Pet::find()
            .select_only()
            .column(entity::pet::Column::Id)
            .column(entity::pet::Column::Name)
            .filter(entity::pet::Column::Id.is_in(pet_ids))
            .into_tuple::<(i32, String)>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        let service_names: HashMap<i32, String> = entity::prelude::Service::find()
            .select_only()
            .column(entity::service::Column::Id)
            .column(entity::service::Column::Name)
            .filter(entity::service::Column::Id.is_in(service_ids))
            .into_tuple::<(i32, String)>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        let business_names: HashMap<i32, String> = entity::prelude::Business::find()
            .select_only()
            .column(entity::business::Column::Id)
            .column(entity::business::Column::Name)
            .filter(entity::business::Column::Id.is_in(business_ids))
            .into_tuple::<(i32, String)>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingDetails {
                pet_name: pet_names.get(&booking.pet_id).cloned(),
                service_name: service_names.get(&booking.service_id).cloned(),
                business_name: business_names.get(&booking.business_id).cloned(),
                booking,
            })
            .collect())
    }

    /// Sets the status and overwrites the cancellation details with `change`, so a
    /// booking moved out of `cancelled` loses its stale cancellation data.
    pub async fn update_status(
        &self,
        id: i32,
        change: StatusChange,
    ) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = entity.into();
        active.status = ActiveValue::Set(change.status.as_str().to_string());
        active.cancelled_at = ActiveValue::Set(change.cancelled_at);
        active.cancellation_reason = ActiveValue::Set(change.cancellation_reason);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Booking::from_entity(active.update(self.db).await?)?))
    }

    pub async fn update_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = entity.into();
        active.payment_status = ActiveValue::Set(payment_status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Booking::from_entity(active.update(self.db).await?)?))
    }

    /// Stores a rating on a booking that has none yet.
    ///
    /// # Returns
    /// - `Ok(Some(Booking))` - Rated booking
    /// - `Ok(None)` - Booking missing or already rated
    pub async fn rate(
        &self,
        id: i32,
        rating: i32,
        review: Option<String>,
    ) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find_by_id(id)
            .filter(entity::booking::Column::Rating.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: entity::booking::ActiveModel = entity.into();
        active.rating = ActiveValue::Set(Some(rating));
        active.review = ActiveValue::Set(review);
        active.rated_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        Ok(Some(Booking::from_entity(active.update(self.db).await?)?))
    }

    /// All ratings given to bookings of a business.
    pub async fn ratings_for_business(&self, business_id: i32) -> Result<Vec<i32>, DbErr> {
        let ratings: Vec<Option<i32>> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Rating)
            .filter(entity::booking::Column::BusinessId.eq(business_id))
            .filter(entity::booking::Column::Rating.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ratings.into_iter().flatten().collect())
    }

    /// Counts bookings per status.
    pub async fn count_by_status(&self) -> Result<HashMap<BookingStatus, u64>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Status)
            .column_as(entity::booking::Column::Id.count(), "count")
            .group_by(entity::booking::Column::Status)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| {
                Ok::<_, DbErr>((parse_column("booking.status", &status)?, count as u64))
            })
            .collect()
    }

    /// Sum of `total_price` over paid bookings.
    pub async fn paid_revenue(&self) -> Result<f64, DbErr> {
        let prices: Vec<f64> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::TotalPrice)
            .filter(entity::booking::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(prices.into_iter().sum())
    }
}
