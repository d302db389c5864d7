//! Request extractors that report rejections as [`AppError`].
//!
//! Axum's stock `Json`, `Query`, and `Path` extractors answer malformed
//! input with plain-text bodies and, for JSON, `422`. These wrappers keep the
//! `{ "error", "code" }` JSON shape and map malformed input to `400`.
//! Oversized bodies keep their `413`.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body.
///
/// An empty body is read as `{}`, so a bodyless `PATCH` is an empty patch
/// while a bodyless `POST` still fails on its required fields. A non-empty
/// body must be JSON when a `Content-Type` header is present.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;

        if bytes.is_empty() {
            return parse_json(b"{}");
        }

        if let Some(content_type) = content_type {
            if !is_json_content_type(&content_type) {
                return Err(AppError::UnsupportedMediaType(content_type));
            }
        }

        parse_json(&bytes)
    }
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<JsonBody<T>, AppError> {
    serde_json::from_slice(bytes)
        .map(JsonBody)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// `application/json` and any `+json` suffix type, ignoring parameters.
fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Query string parameters.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| QueryParams(params))
            .map_err(|e| AppError::BadRequest(e.body_text()))
    }
}

/// URL path parameters.
#[derive(Debug)]
pub struct PathParams<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(params)| PathParams(params))
            .map_err(|e| AppError::BadRequest(e.body_text()))
    }
}
