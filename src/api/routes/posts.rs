//! Admin article handlers: publish, delete, history.

use super::PublishedResponse;
use super::system::snapshot_stream;
use crate::api::AppState;
use crate::api::preference::Preference;
use crate::error::{Error, Result};
use crate::newsroom::{ImageUpload, PostForm};
use crate::types::{ArticleId, Session};
use crate::views::PostSummary;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event as SseEvent, Sse},
    },
};
use std::convert::Infallible;
use tokio::sync::mpsc;

/// POST /admin/posts - Publish an article
///
/// Multipart fields: `title`, `english_title`, `content`,
/// `english_content`, `category`, optional `video_link` and an optional
/// `image` file.
#[utoipa::path(
    post,
    path = "/api/v1/admin/posts",
    tag = "admin",
    request_body(content = PostForm, description = "Article form with an optional image file (multipart/form-data)", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Article published", body = PublishedResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ApiError),
        (status = 401, description = "Not signed in", body = crate::error::ApiError),
        (status = 403, description = "Account may not publish", body = crate::error::ApiError),
        (status = 504, description = "Image upload timed out", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn publish_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut form = PostForm::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::Validation(format!("Failed to read image: {}", e)))?;
            // Browsers send an empty part when no file was chosen
            if !bytes.is_empty() {
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| Error::Validation(format!("Failed to read field '{}': {}", name, e)))?;
        match name.as_str() {
            "title" => form.title = value,
            "english_title" => form.english_title = value,
            "content" => form.content = value,
            "english_content" => form.english_content = value,
            "category" => form.category = value,
            "video_link" => form.video_link = Some(value),
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    let id = state
        .newsroom
        .publish_post(&session.actor, form, image)
        .await?;
    Ok((StatusCode::CREATED, Json(PublishedResponse { id })).into_response())
}

/// GET /admin/posts - Every article, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts",
    tag = "admin",
    responses(
        (status = 200, description = "Post history", body = Vec<PostSummary>),
        (status = 401, description = "Not signed in", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Preference(lang): Preference,
) -> Result<Json<Vec<PostSummary>>> {
    Ok(Json(state.newsroom.list_posts(lang).await?))
}

/// GET /admin/posts/live - Post history as a live stream
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/live",
    tag = "admin",
    responses(
        (status = 200, description = "`posts` events carrying the full list, sent now and after every change", content_type = "text/event-stream"),
        (status = 401, description = "Not signed in", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn watch_posts(
    State(state): State<AppState>,
    Preference(lang): Preference,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = state.newsroom.watch_posts(lang, move |posts| {
        let _ = tx.send(posts);
    });
    snapshot_stream("posts", rx, handle)
}

/// DELETE /admin/posts/:id - Delete an article
#[utoipa::path(
    delete,
    path = "/api/v1/admin/posts/{id}",
    tag = "admin",
    params(
        ("id" = String, Path, description = "Article id")
    ),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Not signed in", body = crate::error::ApiError),
        (status = 403, description = "Account may not delete", body = crate::error::ApiError),
        (status = 404, description = "Article not found", body = crate::error::ApiError)
    ),
    security(("bearer" = []))
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .newsroom
        .delete_post(&session.actor, &ArticleId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
