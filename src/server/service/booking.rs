use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        booking::{
            BookingStatus, CreateBookingDto, PaymentStatus, RateBookingDto,
            UpdateBookingStatusDto,
        },
        user::UserRole,
    },
    server::{
        data::{
            booking::BookingRepository, business::BusinessRepository,
            offering::OfferingRepository, pet::PetRepository,
        },
        error::{validation::ValidationError, AppError},
        model::{
            booking::{
                Booking, BookingDetails, BookingFilter, BookingScope, CreateBookingParams,
                StatusChange,
            },
            clean,
            user::User,
        },
        util::pagination::{Page, PageRequest},
    },
};

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a service for a pet.
    ///
    /// The pet must be active and belong to the caller (admins may book any pet), the
    /// service and its business must be active, and the appointment must be in the
    /// future. A slot is taken when a pending or confirmed booking exists for the same
    /// service at exactly the same instant. The price is copied from the service.
    ///
    /// # Returns
    /// - `Ok(BookingDetails)` - Pending booking
    /// - `Err(AppError::NotFound)` - Pet, service or business missing or deleted
    /// - `Err(AppError::Forbidden)` - Pet belongs to someone else
    /// - `Err(AppError::ValidationErr)` - Appointment not in the future
    /// - `Err(AppError::Conflict)` - Slot already taken
    pub async fn create(
        &self,
        caller: &User,
        dto: CreateBookingDto,
    ) -> Result<BookingDetails, AppError> {
        let pet = PetRepository::new(self.db)
            .find_active_by_id(dto.pet_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pet {} not found", dto.pet_id)))?;
        if !caller.owns_or_admin(pet.owner_id) {
            return Err(AppError::Forbidden(
                "You may only book services for your own pets".to_string(),
            ));
        }

        let service = OfferingRepository::new(self.db)
            .find_active_by_id(dto.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", dto.service_id)))?;
        BusinessRepository::new(self.db)
            .find_active_by_id(service.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service is no longer available".to_string()))?;

        if dto.appointment_date_time <= Utc::now() {
            return Err(ValidationError::field(
                "appointment_date_time",
                "Appointment must be in the future",
            )
            .into());
        }

        let booking_repo = BookingRepository::new(self.db);
        if booking_repo
            .has_conflict(service.id, dto.appointment_date_time)
            .await?
        {
            return Err(AppError::Conflict(
                "This time slot is already booked".to_string(),
            ));
        }

        let booking = booking_repo
            .create(CreateBookingParams {
                owner_id: pet.owner_id,
                business_id: service.business_id,
                service_id: service.id,
                pet_id: pet.id,
                appointment_date_time: dto.appointment_date_time,
                total_price: service.price,
                notes: clean(dto.notes),
            })
            .await?;

        tracing::info!(
            "User {} booked service {} for pet {} at {}",
            caller.id,
            service.id,
            pet.id,
            booking.appointment_date_time
        );

        self.details(booking).await
    }

    /// Lists bookings visible to the caller, latest appointment first.
    ///
    /// Pet owners see their own bookings, business owners see bookings of their
    /// businesses and admins see everything.
    pub async fn get_paginated(
        &self,
        caller: &User,
        status: Option<BookingStatus>,
        business_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<BookingDetails>, AppError> {
        let scope = match caller.role {
            UserRole::Admin => BookingScope::All,
            UserRole::BusinessOwner => BookingScope::Businesses(
                BusinessRepository::new(self.db)
                    .ids_by_owner(caller.id)
                    .await?,
            ),
            UserRole::PetOwner => BookingScope::Owner(caller.id),
        };

        let repo = BookingRepository::new(self.db);
        let (bookings, total) = repo
            .get_paginated(
                BookingFilter {
                    scope,
                    status,
                    business_id,
                },
                page,
            )
            .await?;

        Ok(Page::new(repo.with_details(bookings).await?, total, page))
    }

    /// Gets a booking the caller is party to.
    ///
    /// # Access Control
    /// - The booking owner, the owner of the booked business, or admin
    pub async fn get(&self, caller: &User, id: i32) -> Result<BookingDetails, AppError> {
        let booking = self.find(id).await?;

        let is_party =
            booking.owner_id == caller.id || self.is_business_owner(caller, &booking).await?;
        if !is_party && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "You may not view this booking".to_string(),
            ));
        }

        self.details(booking).await
    }

    /// Changes the status of a booking.
    ///
    /// The business owner and admins may set any status; the booking owner may only
    /// cancel. Cancelling records the time and optional reason.
    pub async fn update_status(
        &self,
        caller: &User,
        id: i32,
        dto: UpdateBookingStatusDto,
    ) -> Result<BookingDetails, AppError> {
        let booking = self.find(id).await?;

        let manages = caller.is_admin() || self.is_business_owner(caller, &booking).await?;
        if !manages {
            if booking.owner_id != caller.id {
                return Err(AppError::Forbidden(
                    "You may not change this booking".to_string(),
                ));
            }
            if dto.status != BookingStatus::Cancelled {
                return Err(AppError::Forbidden(
                    "Pet owners may only cancel bookings".to_string(),
                ));
            }
        }

        let change = if dto.status == BookingStatus::Cancelled {
            StatusChange {
                status: dto.status,
                cancellation_reason: clean(dto.cancellation_reason),
                cancelled_at: Some(Utc::now()),
            }
        } else {
            StatusChange {
                status: dto.status,
                cancellation_reason: None,
                cancelled_at: None,
            }
        };

        let booking = BookingRepository::new(self.db)
            .update_status(id, change)
            .await?
            .ok_or_else(|| booking_not_found(id))?;

        tracing::info!(
            "User {} set booking {} to {}",
            caller.id,
            id,
            booking.status.as_str()
        );

        self.details(booking).await
    }

    /// Sets the payment status.
    ///
    /// # Access Control
    /// - Owner of the booked business or admin
    pub async fn update_payment_status(
        &self,
        caller: &User,
        id: i32,
        payment_status: PaymentStatus,
    ) -> Result<BookingDetails, AppError> {
        let booking = self.find(id).await?;

        if !caller.is_admin() && !self.is_business_owner(caller, &booking).await? {
            return Err(AppError::Forbidden(
                "Only the business may update payments".to_string(),
            ));
        }

        let booking = BookingRepository::new(self.db)
            .update_payment_status(id, payment_status)
            .await?
            .ok_or_else(|| booking_not_found(id))?;

        self.details(booking).await
    }

    /// Rates a completed booking once and refreshes the business rating.
    ///
    /// # Returns
    /// - `Ok(BookingDetails)` - Rated booking
    /// - `Err(AppError::ValidationErr)` - Rating outside 1 to 5
    /// - `Err(AppError::Forbidden)` - Caller does not own the booking
    /// - `Err(AppError::BadRequest)` - Booking not completed
    /// - `Err(AppError::Conflict)` - Booking already rated
    pub async fn rate(
        &self,
        caller: &User,
        id: i32,
        dto: RateBookingDto,
    ) -> Result<BookingDetails, AppError> {
        if !(1..=5).contains(&dto.rating) {
            return Err(ValidationError::field("rating", "Rating must be between 1 and 5").into());
        }

        let booking = self.find(id).await?;
        if booking.owner_id != caller.id {
            return Err(AppError::Forbidden(
                "Only the booking owner may rate it".to_string(),
            ));
        }
        if booking.status != BookingStatus::Completed {
            return Err(AppError::BadRequest(
                "Only completed bookings can be rated".to_string(),
            ));
        }

        let repo = BookingRepository::new(self.db);
        let booking = repo
            .rate(id, dto.rating, clean(dto.review))
            .await?
            .ok_or_else(|| AppError::Conflict("Booking has already been rated".to_string()))?;

        let ratings = repo.ratings_for_business(booking.business_id).await?;
        let count = ratings.len() as i32;
        let average = (count > 0)
            .then(|| ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / f64::from(count));
        BusinessRepository::new(self.db)
            .set_rating(booking.business_id, average, count)
            .await?;

        self.details(booking).await
    }

    async fn find(&self, id: i32) -> Result<Booking, AppError> {
        BookingRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| booking_not_found(id))
    }

    async fn is_business_owner(&self, caller: &User, booking: &Booking) -> Result<bool, AppError> {
        let owner_id = BusinessRepository::new(self.db)
            .find_owner_id(booking.business_id)
            .await?;

        Ok(owner_id == Some(caller.id))
    }

    async fn details(&self, booking: Booking) -> Result<BookingDetails, AppError> {
        let id = booking.id;

        BookingRepository::new(self.db)
            .with_details(vec![booking])
            .await?
            .pop()
            .ok_or_else(|| booking_not_found(id))
    }
}

fn booking_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Booking {} not found", id))
}
