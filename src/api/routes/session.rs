//! Admin sign-in state handlers.

use super::{LoginRequest, SessionResponse, SessionStatus};
use crate::api::AppState;
use crate::api::auth::bearer_token;
use crate::auth::SIGN_IN_FAILED_MESSAGE;
use crate::error::{Error, Result};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

/// POST /session/login - Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/session/login",
    tag = "session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, description = "Email or password missing", body = crate::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    match state.newsroom.sign_in(&request.email, &request.password).await {
        Ok(session) => Ok(Json(session.into())),
        Err(e @ Error::Validation(_)) => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "sign-in failed");
            Err(Error::Unauthorized(SIGN_IN_FAILED_MESSAGE.to_string()))
        }
    }
}

/// POST /session/logout - Close the current session
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    tag = "session",
    responses(
        (status = 204, description = "Signed out (also when no session was open)")
    )
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        state.newsroom.sign_out(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /session - Current sign-in state
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "session",
    responses(
        (status = 200, description = "Whether the bearer token is signed in", body = SessionStatus)
    )
)]
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStatus>> {
    let session = match bearer_token(&headers) {
        Some(token) => state.newsroom.current_session(token).await?,
        None => None,
    };
    Ok(Json(SessionStatus {
        signed_in: session.is_some(),
        session: session.map(SessionResponse::from),
    }))
}
