use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// The process-wide secret protected routes are checked against.
/// Built once from configuration and carried in the router state.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Ensure the inbound request is authorized.
    /// Requires header `X-API-KEY` whose value equals the configured key
    /// byte for byte: no trimming, no case folding. An empty value never
    /// matches.
    pub fn ensure_authorized(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let Some(presented) = headers.get(API_KEY_HEADER) else {
            debug!("request without api key");
            return Err(AppError::Unauthorized);
        };

        let presented = presented.as_bytes();
        if presented.is_empty() || !bool::from(presented.ct_eq(self.0.as_bytes())) {
            debug!("request with invalid api key");
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Guard extractor for protected routes; installed with
/// `middleware::from_extractor_with_state` so it runs before any other
/// extractor touches the request.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl<S> FromRequestParts<S> for RequireApiKey
where
    S: Send + Sync,
    ApiKey: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        ApiKey::from_ref(state).ensure_authorized(&parts.headers)?;
        Ok(Self)
    }
}
