//! Session middleware for the admin routes
//!
//! Admin requests carry the token returned by `POST /session/login` in an
//! `Authorization: Bearer <token>` header. The middleware resolves it to a
//! live [`Session`] and stores it in the request extensions, where handlers
//! pick it up with `Extension<Session>`.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::error::Error;
use crate::types::Session;

/// Shown when an admin route is called without a live session
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in as an admin.";

/// Bearer token from the `Authorization` header, if present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Reject requests without a live admin session
///
/// # Returns
///
/// - 401 Unauthorized if the token is missing, unknown or expired
/// - The response from the next handler otherwise, with the [`Session`]
///   available as a request extension
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return Error::Unauthorized(LOGIN_REQUIRED_MESSAGE.to_string()).into_response();
    };

    match state.newsroom.current_session(&token).await {
        Ok(Some(session)) => {
            request.extensions_mut().insert::<Session>(session);
            next.run(request).await
        }
        Ok(None) => Error::Unauthorized(LOGIN_REQUIRED_MESSAGE.to_string()).into_response(),
        Err(e) => e.into_response(),
    }
}
