//! Labels and the reader's language toggle.

use super::{LabelsResponse, LanguageResponse};
use crate::api::preference::{Preference, language_cookie};
use crate::i18n;
use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};

/// GET /labels - Every UI label in the reader's language
#[utoipa::path(
    get,
    path = "/api/v1/labels",
    tag = "locale",
    params(
        ("lang" = Option<String>, Query, description = "Display language: ta or en")
    ),
    responses(
        (status = 200, description = "Label key to text", body = LabelsResponse)
    )
)]
pub async fn get_labels(Preference(lang): Preference) -> Json<LabelsResponse> {
    let labels = i18n::labels(lang)
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();
    Json(LabelsResponse {
        language: lang,
        labels,
    })
}

/// GET /language - The reader's current language
#[utoipa::path(
    get,
    path = "/api/v1/language",
    tag = "locale",
    responses(
        (status = 200, description = "Current language", body = LanguageResponse)
    )
)]
pub async fn get_language(Preference(lang): Preference) -> Json<LanguageResponse> {
    Json(lang.into())
}

/// POST /language/toggle - Switch between Tamil and English
#[utoipa::path(
    post,
    path = "/api/v1/language/toggle",
    tag = "locale",
    responses(
        (status = 200, description = "New language, persisted in the language cookie", body = LanguageResponse)
    )
)]
pub async fn toggle_language(Preference(lang): Preference) -> Response {
    let next = lang.toggled();
    tracing::debug!(from = %lang, to = %next, "language toggled");
    (
        [(header::SET_COOKIE, language_cookie(next))],
        Json(LanguageResponse::from(next)),
    )
        .into_response()
}
