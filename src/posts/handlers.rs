use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{extractors::CurrentUser, middleware::require_auth},
    error::{parse_id, AppError, AppResult},
    posts::{
        dto::{CreatePostRequest, LikeResponse, PostResponse, CONTENT_MAX},
        repo_types::PostWithAuthor,
    },
    state::AppState,
};

pub fn post_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id/like", post(like_post))
        .route("/posts/user/:id", get(list_author_posts))
        .route_layer(from_fn_with_state(state, require_auth))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = state.posts.list_recent().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Serves both `/posts/user/:id` and `/users/:id/posts`.
#[instrument(skip(state))]
pub async fn list_author_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let author_id = parse_id(&id, "User not found")?;
    let posts = state.posts.list_by_author(author_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state, identity, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let Json(payload) = payload?;
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Content is required".into()));
    }
    if content.chars().count() > CONTENT_MAX {
        return Err(AppError::Validation(
            "Post content cannot be more than 1000 characters".into(),
        ));
    }

    let post = state.posts.create(identity.user_id, content).await?;
    info!(post_id = %post.id, author_id = %post.author_id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from(PostWithAuthor {
            post,
            author: identity.user,
        })),
    ))
}

#[instrument(skip(state))]
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LikeResponse>> {
    let post_id = parse_id(&id, "Post not found")?;
    let post = state
        .posts
        .like(post_id)
        .await?
        .ok_or(AppError::NotFound("Post not found"))?;
    Ok(Json(LikeResponse {
        id: post.id,
        likes: post.likes,
    }))
}
