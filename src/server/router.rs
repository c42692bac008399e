use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        address::{self, ADDRESS_TAG},
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        booking::{self, BOOKING_TAG},
        business::{self, BUSINESS_TAG},
        file::{self, FILE_TAG},
        health::{self, HEALTH_TAG},
        offering::{self, SERVICE_TAG},
        pet::{self, PET_TAG},
        user::{self, USER_TAG},
    },
    state::AppState,
};

/// Largest accepted upload request: twenty gallery images of 5 MB each.
const MAX_UPLOAD_BODY_BYTES: usize = 100 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PawHub API",
        description = "Pet services marketplace: pets, businesses, services, bookings and files"
    ),
    modifiers(&BearerAuth),
    tags(
        (name = AUTH_TAG, description = "Registration, login and session tokens"),
        (name = USER_TAG, description = "Accounts and profiles"),
        (name = PET_TAG, description = "Pets and their health records"),
        (name = BUSINESS_TAG, description = "Businesses and search"),
        (name = SERVICE_TAG, description = "Services offered by businesses"),
        (name = BOOKING_TAG, description = "Bookings, payments and ratings"),
        (name = ADDRESS_TAG, description = "Saved addresses"),
        (name = ADMIN_TAG, description = "Platform administration"),
        (name = FILE_TAG, description = "File uploads and signed URLs"),
        (name = HEALTH_TAG, description = "Liveness")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Builds the complete application router.
///
/// Handlers are registered through `routes!` so that every `#[utoipa::path]` lands in
/// the OpenAPI document served at `/api-docs/openapi.json`. Handlers sharing a path
/// must be registered in the same `routes!` call.
///
/// # Arguments
/// - `state` - Shared application state
/// - `cors_origins` - Allowed browser origins; empty allows any origin
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::refresh))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        .routes(routes!(auth::change_password))
        .routes(routes!(user::get_me, user::update_me, user::delete_me))
        .routes(routes!(user::get_my_profile, user::update_my_profile))
        .routes(routes!(user::get_user))
        .routes(routes!(pet::create_pet, pet::get_pets))
        .routes(routes!(pet::get_pet, pet::update_pet, pet::delete_pet))
        .routes(routes!(pet::add_vaccination))
        .routes(routes!(pet::add_medical_record))
        .routes(routes!(
            business::create_business,
            business::search_businesses
        ))
        .routes(routes!(business::get_my_businesses))
        .routes(routes!(
            business::get_business,
            business::update_business,
            business::delete_business
        ))
        .routes(routes!(business::get_business_services))
        .routes(routes!(offering::create_service, offering::get_services))
        .routes(routes!(
            offering::get_service,
            offering::update_service,
            offering::delete_service
        ))
        .routes(routes!(booking::create_booking, booking::get_bookings))
        .routes(routes!(booking::get_booking))
        .routes(routes!(booking::update_booking_status))
        .routes(routes!(booking::update_payment_status))
        .routes(routes!(booking::rate_booking))
        .routes(routes!(address::get_addresses, address::create_address))
        .routes(routes!(
            address::get_address,
            address::update_address,
            address::delete_address
        ))
        .routes(routes!(address::set_default_address))
        .routes(routes!(admin::get_stats))
        .routes(routes!(admin::get_users))
        .routes(routes!(admin::update_user_status))
        .routes(routes!(admin::update_user_role))
        .routes(routes!(admin::verify_business))
        .merge(file_routes())
        .split_for_parts();

    api_router
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn file_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(file::upload_files))
        .routes(routes!(file::list_files))
        .routes(routes!(file::delete_file))
        .routes(routes!(file::get_file_url))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}

/// Any origin without credentials when `origins` is empty; otherwise only the listed
/// origins, with cookies allowed. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
