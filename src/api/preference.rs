//! Per-request language preference
//!
//! The reader's language is resolved from, in order: the `lang` query
//! parameter, the `language` cookie, then `site.default_language`. Unknown
//! values are skipped rather than rejected.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{HeaderMap, Uri, header, request::Parts},
};
use serde::Deserialize;
use std::convert::Infallible;

use crate::api::AppState;
use crate::locale::Language;

/// Name of the cookie remembering the reader's language
pub const LANGUAGE_COOKIE: &str = "language";

/// One year, in seconds
const COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// The reader's preferred language for this request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preference(pub Language);

#[async_trait]
impl FromRequestParts<AppState> for Preference {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let language = query_language(&parts.uri)
            .or_else(|| cookie_language(&parts.headers))
            .unwrap_or(state.config.site.default_language);
        Ok(Preference(language))
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<Language>,
}

fn query_language(uri: &Uri) -> Option<Language> {
    Query::<LangQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.lang)
}

fn cookie_language(headers: &HeaderMap) -> Option<Language> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LANGUAGE_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// `Set-Cookie` value persisting `language`
pub fn language_cookie(language: Language) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LANGUAGE_COOKIE,
        language.code(),
        COOKIE_MAX_AGE
    )
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn uri(value: &str) -> Uri {
        value.parse().unwrap()
    }

    #[test]
    fn query_parameter_is_read() {
        assert_eq!(query_language(&uri("/news?lang=ta")), Some(Language::Tamil));
        assert_eq!(
            query_language(&uri("/news?x=1&lang=en")),
            Some(Language::English)
        );
        assert_eq!(query_language(&uri("/news")), None);
    }

    #[test]
    fn query_parameter_is_percent_decoded() {
        assert_eq!(query_language(&uri("/news?lang=t%61")), Some(Language::Tamil));
        assert_eq!(query_language(&uri("/news?lang=%65n")), Some(Language::English));
    }

    #[test]
    fn unknown_query_language_is_skipped() {
        assert_eq!(query_language(&uri("/news?lang=fr")), None);
        assert_eq!(query_language(&uri("/news?lang=")), None);
    }

    #[test]
    fn cookie_is_read_among_others() {
        assert_eq!(
            cookie_language(&cookie("session=abc; language=ta")),
            Some(Language::Tamil)
        );
        assert_eq!(cookie_language(&cookie("session=abc")), None);
    }

    #[test]
    fn cookie_round_trips_through_header() {
        let value = language_cookie(Language::Tamil);
        let pair = value.split(';').next().unwrap();
        assert_eq!(cookie_language(&cookie(pair)), Some(Language::Tamil));
        assert!(value.contains("Path=/"));
    }
}
