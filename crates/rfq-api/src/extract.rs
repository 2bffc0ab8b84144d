//! Request extractors whose rejections use the API error envelope.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor. Malformed bodies, a missing content type and
/// unknown fields are reported as `{error, status}` with status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
