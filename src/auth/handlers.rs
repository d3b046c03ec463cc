use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        extractors::CurrentUser,
        middleware::require_auth,
        password::{hash_password_blocking, verify_decoy, verify_password_blocking},
    },
    error::{AppError, AppResult},
    state::AppState,
    users::{
        repo::CreateUserError,
        repo_types::{NewUser, PublicUser},
        validation::{normalize_email, Violations},
    },
};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(get_me))
        .route_layer(from_fn_with_state(state, require_auth))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(payload) = payload?;
    let name = payload.name.trim().to_string();
    let email = normalize_email(&payload.email);
    let bio = payload.bio.unwrap_or_default();

    Violations::default()
        .name(&name)
        .email(&email)
        .new_password(&payload.password)
        .bio(&bio)
        .finish()?;

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password_blocking(payload.password).await?;

    let user = match state
        .users
        .create(NewUser {
            name,
            email,
            password_hash,
            bio,
        })
        .await
    {
        Ok(u) => u,
        Err(CreateUserError::EmailTaken) => {
            warn!("email registered concurrently");
            return Err(AppError::DuplicateEmail);
        }
        Err(CreateUserError::Store(e)) => return Err(e.into()),
    };

    let token = state.jwt.issue(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(payload) = payload?;
    let email = normalize_email(&payload.email);

    Violations::default()
        .email(&email)
        .password_present(&payload.password)
        .finish()?;

    let user = match state.users.find_by_email(&email).await? {
        Some(u) => u,
        None => {
            verify_decoy(payload.password).await;
            warn!(email = %email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    let ok = verify_password_blocking(payload.password, user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt.issue(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(identity): CurrentUser) -> Json<PublicUser> {
    Json(identity.user)
}
