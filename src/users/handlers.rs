use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    middleware::from_fn_with_state,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        extractors::{CurrentUser, MaybeUser},
        middleware::{optional_auth, require_auth},
    },
    error::{parse_id, AppError, AppResult},
    posts::handlers::list_author_posts,
    state::AppState,
    users::{
        dto::{ProfileResponse, SearchQuery, UpdateProfileRequest},
        repo_types::{ProfileChanges, PublicUser},
        validation::Violations,
    },
};

const SEARCH_LIMIT: i64 = 10;

pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users", get(search_users))
        .route("/users/:id", put(update_profile))
        .route("/users/:id/posts", get(list_author_posts))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/users/:id", get(get_profile))
        .route_layer(from_fn_with_state(state, optional_auth));

    protected.merge(public)
}

#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<PublicUser>>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(AppError::Validation("Search query is required".into()));
    }

    let users = state.users.search(q, SEARCH_LIMIT).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, viewer))]
pub async fn get_profile(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProfileResponse>> {
    let id = parse_id(&id, "User not found")?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let viewer = viewer.map(|v| v.user_id);
    Ok(Json(ProfileResponse::for_viewer(user.into(), viewer)))
}

#[instrument(skip(state, identity, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<PublicUser>> {
    if parse_id(&id, "User not found").ok() != Some(identity.user_id) {
        warn!(caller = %identity.user_id, target = %id, "profile update by non-owner");
        return Err(AppError::Forbidden("Unauthorized to update this profile"));
    }
    let Json(payload) = payload?;

    // An empty name means "leave it"; an empty bio clears it.
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let mut violations = Violations::default();
    if let Some(name) = &name {
        violations.name(name);
    }
    if let Some(bio) = &payload.bio {
        violations.bio(bio);
    }
    violations.finish()?;

    let user = state
        .users
        .update_profile(
            identity.user_id,
            ProfileChanges {
                name,
                bio: payload.bio,
            },
        )
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(user.into()))
}
