use super::as_user;
use crate::{
    model::booking::{
        BookingStatus, CreateBookingDto, PaymentStatus, RateBookingDto, UpdateBookingStatusDto,
    },
    server::{
        data::business::BusinessRepository, error::AppError, service::booking::BookingService,
        util::pagination::PageRequest,
    },
};
use chrono::{DateTime, Duration, DurationRound, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, helpers::create_booking_dependencies},
};

fn slot(days: i64) -> DateTime<Utc> {
    (Utc::now() + Duration::days(days))
        .duration_trunc(Duration::hours(1))
        .unwrap()
}

fn booking_dto(service_id: i32, pet_id: i32, at: DateTime<Utc>) -> CreateBookingDto {
    CreateBookingDto {
        service_id,
        pet_id,
        appointment_date_time: at,
        notes: None,
    }
}

fn status(status: BookingStatus) -> UpdateBookingStatusDto {
    UpdateBookingStatusDto {
        status,
        cancellation_reason: None,
    }
}

/// Tests the double booking rule.
///
/// Verifies that a second booking for the same service and instant is rejected while
/// the first is pending, and accepted once the first has been cancelled.
///
/// Expected: Conflict, then Ok after cancellation
#[tokio::test]
async fn rejects_double_booking_until_cancelled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, _, service) = create_booking_dependencies(db).await?;
    let owner = as_user(owner);
    let at = slot(2);
    let bookings = BookingService::new(db);

    let first = bookings
        .create(&owner, booking_dto(service.id, pet.id, at))
        .await?;
    assert_eq!(first.booking.status, BookingStatus::Pending);
    assert_eq!(first.booking.total_price, service.price);
    assert_eq!(first.pet_name.as_deref(), Some(pet.name.as_str()));

    let second = bookings
        .create(&owner, booking_dto(service.id, pet.id, at))
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let cancelled = bookings
        .update_status(
            &owner,
            first.booking.id,
            UpdateBookingStatusDto {
                status: BookingStatus::Cancelled,
                cancellation_reason: Some("Vet visit".to_string()),
            },
        )
        .await?;
    assert!(cancelled.booking.cancelled_at.is_some());
    assert_eq!(
        cancelled.booking.cancellation_reason.as_deref(),
        Some("Vet visit")
    );

    bookings
        .create(&owner, booking_dto(service.id, pet.id, at))
        .await?;

    Ok(())
}

/// Tests booking preconditions.
///
/// Verifies past appointments, other users' pets and inactive services are refused.
///
/// Expected: ValidationErr, Forbidden and NotFound respectively
#[tokio::test]
async fn refuses_invalid_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let owner = as_user(owner);
    let stranger = as_user(factory::create_user(db).await?);
    let retired = test_utils::factory::offering::OfferingFactory::new(db, business.id)
        .is_active(false)
        .build()
        .await?;
    let bookings = BookingService::new(db);

    let past = bookings
        .create(&owner, booking_dto(service.id, pet.id, slot(-1)))
        .await;
    assert!(matches!(past, Err(AppError::ValidationErr(_))));

    let foreign = bookings
        .create(&stranger, booking_dto(service.id, pet.id, slot(2)))
        .await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let inactive = bookings
        .create(&owner, booking_dto(retired.id, pet.id, slot(2)))
        .await;
    assert!(matches!(inactive, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests status permissions.
///
/// Verifies the pet owner may only cancel while the business owner may set any
/// status, and that unrelated users cannot see the booking.
///
/// Expected: Forbidden for the pet owner confirming and for a stranger reading
#[tokio::test]
async fn restricts_status_changes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, business_owner, business, service) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .build()
        .await?;
    let owner = as_user(owner);
    let business_owner = as_user(business_owner);
    let stranger = as_user(factory::create_user(db).await?);
    let bookings = BookingService::new(db);

    let denied = bookings
        .update_status(&owner, booking.id, status(BookingStatus::Confirmed))
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let confirmed = bookings
        .update_status(&business_owner, booking.id, status(BookingStatus::Confirmed))
        .await?;
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);

    let paid = bookings
        .update_payment_status(&business_owner, booking.id, PaymentStatus::Paid)
        .await?;
    assert_eq!(paid.booking.payment_status, PaymentStatus::Paid);

    assert!(bookings.get(&business_owner, booking.id).await.is_ok());
    assert!(matches!(
        bookings.get(&stranger, booking.id).await,
        Err(AppError::Forbidden(_))
    ));

    Ok(())
}

/// Tests listing scopes.
///
/// Verifies pet owners see their own bookings, business owners see bookings of their
/// businesses and admins see everything.
///
/// Expected: totals 1, 1 and 2
#[tokio::test]
async fn scopes_listing_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, business_owner, business, service) = create_booking_dependencies(db).await?;
    let (other_owner, other_pet, _, other_business, other_service) =
        create_booking_dependencies(db).await?;
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .build()
        .await?;
    BookingFactory::new(
        db,
        other_owner.id,
        other_pet.id,
        other_business.id,
        other_service.id,
    )
    .build()
    .await?;
    let admin = as_user(factory::create_user_with_role(db, "admin").await?);
    let bookings = BookingService::new(db);
    let page = PageRequest::default();

    let mine = bookings
        .get_paginated(&as_user(owner), None, None, page)
        .await?;
    assert_eq!(mine.total, 1);

    let for_business = bookings
        .get_paginated(&as_user(business_owner), None, None, page)
        .await?;
    assert_eq!(for_business.total, 1);
    assert_eq!(for_business.items[0].booking.business_id, business.id);

    let all = bookings.get_paginated(&admin, None, None, page).await?;
    assert_eq!(all.total, 2);

    Ok(())
}

/// Tests rating a booking.
///
/// Verifies only completed bookings can be rated, only once, and that the business
/// average is recomputed.
///
/// Expected: BadRequest, Ok, Conflict; business average 4.0 over 1 rating
#[tokio::test]
async fn rates_completed_booking_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let pending = BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .build()
        .await?;
    let done = BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .appointment(slot(3))
        .status("completed")
        .build()
        .await?;
    let owner = as_user(owner);
    let bookings = BookingService::new(db);
    let rating = |value| RateBookingDto {
        rating: value,
        review: Some("Great".to_string()),
    };

    let not_done = bookings.rate(&owner, pending.id, rating(5)).await;
    assert!(matches!(not_done, Err(AppError::BadRequest(_))));

    let out_of_range = bookings.rate(&owner, done.id, rating(6)).await;
    assert!(matches!(out_of_range, Err(AppError::ValidationErr(_))));

    let rated = bookings.rate(&owner, done.id, rating(4)).await?;
    assert_eq!(rated.booking.rating, Some(4));

    let again = bookings.rate(&owner, done.id, rating(1)).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    let business = BusinessRepository::new(db)
        .find_active_by_id(business.id)
        .await?
        .unwrap();
    assert_eq!(business.average_rating, Some(4.0));
    assert_eq!(business.rating_count, 1);

    Ok(())
}
