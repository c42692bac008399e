use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderName, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{AuthResponseDto, ChangePasswordDto, LoginDto, RefreshDto, RegisterDto},
        user::UserDto,
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            cookie::{read_cookie, CookieSettings, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
        },
        service::{
            auth::{AuthService, AuthSession},
            token::TokenService,
        },
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates the user with an empty profile, signs them in and sets the auth cookies.
/// The role defaults to `pet_owner`; `admin` cannot be self-assigned.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - Account created, tokens issued
/// - `409 Conflict` - Email already registered
/// - `422 Unprocessable Entity` - Invalid payload
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .register(payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        session_cookies(&state.cookies, &state.tokens, &session),
        Json(session_dto(session)),
    ))
}

/// Log in with email and password.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Tokens issued and cookies set
/// - `401 Unauthorized` - Wrong email or password
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .login(payload)
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.cookies, &state.tokens, &session),
        Json(session_dto(session)),
    ))
}

/// Exchange a refresh token for a new token pair.
///
/// The token is taken from the body, or from the `refresh_token` cookie when the body
/// has none. Each refresh token can be used once.
///
/// # Access Control
/// - Holder of a valid refresh token
///
/// # Returns
/// - `200 OK` - New tokens issued
/// - `401 Unauthorized` - Missing, unknown, expired or already used token
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body(content = RefreshDto, description = "Optional when the refresh cookie is sent"),
    responses(
        (status = 200, description = "Tokens rotated", body = AuthResponseDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<RefreshDto>>,
) -> Result<impl IntoResponse, AppError> {
    let token = payload
        .and_then(|Json(body)| body.refresh_token)
        .or_else(|| read_cookie(&headers, REFRESH_TOKEN_COOKIE))
        .ok_or(AuthError::MissingToken)?;

    let session = AuthService::new(&state.db, &state.tokens)
        .refresh(&token)
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.cookies, &state.tokens, &session),
        Json(session_dto(session)),
    ))
}

/// Log out.
///
/// Revokes the presented refresh token, if any, and clears both auth cookies.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Logged out
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<RefreshDto>>,
) -> Result<impl IntoResponse, AppError> {
    let token = payload
        .and_then(|Json(body)| body.refresh_token)
        .or_else(|| read_cookie(&headers, REFRESH_TOKEN_COOKIE));

    AuthService::new(&state.db, &state.tokens)
        .logout(token.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (SET_COOKIE, state.cookies.clear(ACCESS_TOKEN_COOKIE)),
            (SET_COOKIE, state.cookies.clear(REFRESH_TOKEN_COOKIE)),
        ]),
        Json(MessageDto::ok("Logged out successfully")),
    ))
}

/// Get the current user.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change the password of the current user.
///
/// Every refresh token of the user is revoked, signing out other devices.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Password changed
/// - `401 Unauthorized` - Not authenticated or current password wrong
/// - `422 Unprocessable Entity` - New password too short
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 401, description = "Not authenticated or wrong password", body = ErrorDto),
        (status = 422, description = "New password invalid", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    AuthService::new(&state.db, &state.tokens)
        .change_password(&user, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("Password changed successfully")),
    ))
}

fn session_cookies(
    cookies: &CookieSettings,
    tokens: &TokenService,
    session: &AuthSession,
) -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (
            SET_COOKIE,
            cookies.set(
                ACCESS_TOKEN_COOKIE,
                &session.tokens.access.token,
                tokens.access_ttl(),
            ),
        ),
        (
            SET_COOKIE,
            cookies.set(
                REFRESH_TOKEN_COOKIE,
                &session.tokens.refresh.token,
                tokens.refresh_ttl(),
            ),
        ),
    ])
}

fn session_dto(session: AuthSession) -> AuthResponseDto {
    AuthResponseDto {
        user: session.user.into_dto(),
        access_token: session.tokens.access.token,
        refresh_token: session.tokens.refresh.token,
    }
}
