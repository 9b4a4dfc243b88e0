//! System handlers: health, OpenAPI, event streams.

use crate::api::AppState;
use crate::subscription::SubscriptionHandle;
use crate::types::Event;
use axum::{
    Json,
    extract::State,
    response::{
        IntoResponse,
        sse::{Event as SseEvent, KeepAlive, Sse},
    },
};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::{BroadcastStream, UnboundedReceiverStream};

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "site": state.config.site.name,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/api/v1/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.1 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

/// GET /admin/events - Server-sent newsroom events
#[utoipa::path(
    get,
    path = "/api/v1/admin/events",
    tag = "admin",
    responses(
        (status = 200, description = "Server-sent events stream (text/event-stream)", content_type = "text/event-stream"),
        (status = 401, description = "Not signed in", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let receiver = state.newsroom.subscribe();
    let stream = BroadcastStream::new(receiver);

    let sse_stream = stream.filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json_data) => {
                let event_type = match &event {
                    Event::PostPublished { .. } => "post_published",
                    Event::PostDeleted { .. } => "post_deleted",
                    Event::BannerSaved { .. } => "banner_saved",
                    Event::UploadProgress { .. } => "upload_progress",
                    Event::UploadFailed { .. } => "upload_failed",
                    Event::SignedIn { .. } => "signed_in",
                    Event::SignedOut { .. } => "signed_out",
                };

                Some(Ok(SseEvent::default().event(event_type).data(json_data)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize event");
                None
            }
        },
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE client lagged");
            Some(Ok(SseEvent::default().event("error").data(format!(
                r#"{{"error":"lagged","skipped":{}}}"#,
                skipped
            ))))
        }
    });

    Sse::new(sse_stream).keep_alive(KeepAlive::default())
}

/// Stream every snapshot `rx` receives as an SSE event named `event_name`.
///
/// The stream owns `handle`, so the subscription ends when the client
/// disconnects.
pub(super) fn snapshot_stream<T>(
    event_name: &'static str,
    rx: mpsc::UnboundedReceiver<T>,
    handle: SubscriptionHandle,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>>
where
    T: Serialize + Send + 'static,
{
    let stream = UnboundedReceiverStream::new(rx).filter_map(move |snapshot| {
        let _subscription = &handle;
        match serde_json::to_string(&snapshot) {
            Ok(json_data) => Some(Ok(SseEvent::default().event(event_name).data(json_data))),
            Err(e) => {
                tracing::warn!(event = event_name, error = %e, "failed to serialize snapshot");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
