use axum::http::{header, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::{app, json_body, json_request};
use test_utils::builder::TestBuilder;

/// Tests refresh token rotation over HTTP.
///
/// Registers an account, exchanges its refresh token once, and replays the same
/// token. The replacement token keeps working.
///
/// Expected: 201 with cookies, 200, 401, 200
#[tokio::test]
async fn refresh_token_works_once() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({
                "email": "Rosa@Example.com",
                "password": "correct horse",
                "first_name": "Rosa",
                "last_name": "Diaz"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    let session = json_body(response).await;
    assert_eq!(session["user"]["email"], "rosa@example.com");
    assert_eq!(session["user"]["role"], "pet_owner");
    let first = session["refresh_token"].as_str().unwrap().to_string();

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/refresh",
            None,
            json!({ "refresh_token": first }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = json_body(response).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(rotated, first);

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/refresh",
            None,
            json!({ "refresh_token": first }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/refresh",
            None,
            json!({ "refresh_token": rotated }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Tests that logging in with a wrong password is refused.
///
/// Expected: 401
#[tokio::test]
async fn rejects_wrong_password() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({
                "email": "sam@example.com",
                "password": "long enough",
                "first_name": "Sam",
                "last_name": "Lee"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app(db)
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": "sam@example.com", "password": "not the one" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
