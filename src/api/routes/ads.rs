//! Banner configuration handlers.

use super::system::snapshot_stream;
use crate::api::AppState;
use crate::error::Result;
use crate::types::{BannerConfig, Session};
use crate::views::BannerView;
use axum::{
    Extension, Json,
    extract::State,
    response::sse::{Event as SseEvent, Sse},
};
use std::convert::Infallible;
use tokio::sync::mpsc;

/// GET /admin/ads - Current banner configuration
#[utoipa::path(
    get,
    path = "/api/v1/admin/ads",
    tag = "admin",
    responses(
        (status = 200, description = "Banner configuration and status", body = BannerView),
        (status = 401, description = "Not signed in", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn get_banner(State(state): State<AppState>) -> Result<Json<BannerView>> {
    Ok(Json(state.newsroom.banner_config().await?))
}

/// PUT /admin/ads - Replace the banner configuration
#[utoipa::path(
    put,
    path = "/api/v1/admin/ads",
    tag = "admin",
    request_body = BannerConfig,
    responses(
        (status = 200, description = "Saved configuration", body = BannerView),
        (status = 400, description = "Invalid configuration", body = crate::error::ApiError),
        (status = 401, description = "Not signed in", body = crate::error::ApiError),
        (status = 403, description = "Account may not change the banner", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn save_banner(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(config): Json<BannerConfig>,
) -> Result<Json<BannerView>> {
    Ok(Json(state.newsroom.save_banner(&session.actor, config).await?))
}

/// GET /admin/ads/live - Banner configuration as a live stream
#[utoipa::path(
    get,
    path = "/api/v1/admin/ads/live",
    tag = "admin",
    responses(
        (status = 200, description = "`banner` events, sent now and after every save", content_type = "text/event-stream"),
        (status = 401, description = "Not signed in", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn watch_banner(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = state.newsroom.watch_banner(move |view| {
        let _ = tx.send(view);
    });
    snapshot_stream("banner", rx, handle)
}
