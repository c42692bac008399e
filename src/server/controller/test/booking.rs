use axum::http::{Method, StatusCode};
use chrono::{Duration, SubsecRound, Utc};
use serde_json::json;
use tower::ServiceExt;

use super::{app, json_body, json_request, token_for};
use test_utils::{builder::TestBuilder, factory, factory::helpers::create_booking_dependencies};

/// Tests slot conflicts over HTTP.
///
/// Books a slot, fails to book it again while pending, cancels the first booking,
/// then books the slot successfully.
///
/// Expected: 201, 409, 200, 201
#[tokio::test]
async fn frees_slot_after_cancellation() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (pet_owner, pet, _, _, service) = create_booking_dependencies(db).await.unwrap();
    let token = token_for(pet_owner);

    let appointment = (Utc::now() + Duration::days(3)).trunc_subsecs(0);
    let payload = json!({
        "service_id": service.id,
        "pet_id": pet.id,
        "appointment_date_time": appointment,
    });

    let response = app(db)
        .oneshot(json_request(Method::POST, "/bookings", Some(&token), payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking = json_body(response).await;
    assert_eq!(booking["status"], "pending");

    let response = app(db)
        .oneshot(json_request(Method::POST, "/bookings", Some(&token), payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app(db)
        .oneshot(json_request(
            Method::PATCH,
            &format!("/bookings/{}/status", booking["id"]),
            Some(&token),
            json!({ "status": "cancelled", "cancellation_reason": "Vet visit" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(db)
        .oneshot(json_request(Method::POST, "/bookings", Some(&token), payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Tests that pet owners cannot confirm their own bookings.
///
/// Expected: 403
#[tokio::test]
async fn owner_cannot_confirm_booking() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (pet_owner, pet, _, business, service) =
        create_booking_dependencies(db).await.unwrap();
    let booking = factory::create_booking(db, pet_owner.id, pet.id, business.id, service.id)
        .await
        .unwrap();

    let response = app(db)
        .oneshot(json_request(
            Method::PATCH,
            &format!("/bookings/{}/status", booking.id),
            Some(&token_for(pet_owner)),
            json!({ "status": "confirmed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
