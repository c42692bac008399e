use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

use super::{app, empty_request, json_body, token_for};
use test_utils::{builder::TestBuilder, factory};

const BOUNDARY: &str = "pawhub-test-boundary";

struct Part<'a> {
    file_name: &'a str,
    content_type: &'a str,
    bytes: Vec<u8>,
}

fn multipart_request(uri: &str, token: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                part.file_name, part.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Tests rejected uploads.
///
/// Sends a text file, an oversized image, and an unknown category to a pet the
/// caller owns.
///
/// Expected: 415, 413, 400
#[tokio::test]
async fn rejects_invalid_uploads() {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await.unwrap();
    let pet = factory::create_pet(db, owner.id).await.unwrap();
    let token = token_for(owner);
    let app = app(db);

    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/files/pet/{}/profile", pet.id),
            &token,
            &[Part {
                file_name: "notes.txt",
                content_type: "text/plain",
                bytes: b"hello".to_vec(),
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/files/pet/{}/profile", pet.id),
            &token,
            &[Part {
                file_name: "huge.jpg",
                content_type: "image/jpeg",
                bytes: vec![0xff; 6 * 1024 * 1024],
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let response = app
        .oneshot(multipart_request(
            &format!("/api/files/pet/{}/banner", pet.id),
            &token,
            &[Part {
                file_name: "photo.png",
                content_type: "image/png",
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Tests a successful gallery upload followed by a listing.
///
/// Expected: 201 with two files, both listed under `additional`
#[tokio::test]
async fn uploads_and_lists_pet_images() {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await.unwrap();
    let pet = factory::create_pet(db, owner.id).await.unwrap();
    let token = token_for(owner);
    let app = app(db);

    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/files/pet/{}/additional", pet.id),
            &token,
            &[
                Part {
                    file_name: "park.jpg",
                    content_type: "image/jpeg",
                    bytes: vec![0xff, 0xd8, 0xff, 0xe0],
                },
                Part {
                    file_name: "nap.png",
                    content_type: "image/png",
                    bytes: vec![0x89, 0x50, 0x4e, 0x47],
                },
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["files"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/files/pet/{}", pet.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let additional = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "additional")
        .unwrap();
    assert_eq!(additional["files"].as_array().unwrap().len(), 2);
}
