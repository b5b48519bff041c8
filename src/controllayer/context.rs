use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, Method, Uri, header, request::Parts},
};
use std::convert::Infallible;
use uuid::Uuid;

use crate::middleware::request_id::request_id_from_parts;

/// Snapshot of the inbound request handed to every callback
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestContext {
    /// Bearer token from the `Authorization` header, if any
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes mounted without the request id middleware still get a correlation id
        let request_id = request_id_from_parts(parts).unwrap_or_else(Uuid::new_v4);

        Ok(Self {
            request_id,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        })
    }
}
