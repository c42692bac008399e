//! HTTP contract tests: requests go through the full router with `oneshot`.

mod auth;
mod booking;
mod file;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    config::Config, model::user::User, router::router, service::storage::memory::InMemoryStorage,
    service::token::TokenService, state::AppState,
};

/// Router over `db` with in-memory storage and development settings.
fn app(db: &DatabaseConnection) -> Router {
    let state = AppState::new(
        db.clone(),
        Arc::new(InMemoryStorage::new()),
        &Config::default(),
    );
    router(state, &[])
}

/// Access token for `model`, signed with the development secrets.
fn token_for(model: entity::user::Model) -> String {
    let user = User::from_entity(model).unwrap();
    TokenService::from_config(&Config::default())
        .issue_pair(&user)
        .unwrap()
        .access
        .token
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
