use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    users::repo_types::PublicUser,
};

/// The authenticated caller, attached to request extensions.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub user: PublicUser,
}

/// Outcome of an authentication step, consumed by the routing layer.
#[derive(Debug)]
pub enum Authorization {
    Authorized(Option<Identity>),
    Rejected(AppError),
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingToken)?;
    Ok(token)
}

async fn resolve_identity(headers: &HeaderMap, state: &AppState) -> AppResult<Identity> {
    let token = bearer_token(headers)?;
    let user_id = state.jwt.verify(token)?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Identity {
        user_id,
        user: user.into(),
    })
}

/// Mandatory authentication: any failure rejects the request.
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Authorization {
    match resolve_identity(headers, state).await {
        Ok(identity) => Authorization::Authorized(Some(identity)),
        Err(e) => {
            warn!(reason = %e, "authentication rejected");
            Authorization::Rejected(e)
        }
    }
}

/// Optional authentication: failures leave the request anonymous.
pub async fn optional_authenticate(headers: &HeaderMap, state: &AppState) -> Authorization {
    match resolve_identity(headers, state).await {
        Ok(identity) => Authorization::Authorized(Some(identity)),
        Err(e) => {
            debug!(reason = %e, "optional authentication ignored");
            Authorization::Authorized(None)
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = authenticate(req.headers(), &state).await;
    match outcome {
        Authorization::Authorized(Some(identity)) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Authorization::Authorized(None) => AppError::MissingToken.into_response(),
        Authorization::Rejected(e) => e.into_response(),
    }
}

pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = optional_authenticate(req.headers(), &state).await;
    if let Authorization::Authorized(Some(identity)) = outcome {
        req.extensions_mut().insert(identity);
    }
    next.run(req).await
}
