use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::Deserialize;
use std::marker::PhantomData;
use tracing::error;

use crate::{
    controllayer::{DirtyForm, QueryFilter, Resource, UpdateValues},
    errors::ServiceError,
};

/// Default number of records a list request returns
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// JSON body decoded into `T` and run through its validation rules
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// JSON object body of an update request
///
/// `T` only names the resource in error messages.
#[derive(Debug)]
pub struct UpdateBody<T>(pub UpdateValues, PhantomData<fn() -> T>);

impl<T> UpdateBody<T> {
    pub fn into_inner(self) -> UpdateValues {
        self.0
    }
}

/// Form-encoded body of a dirty create, decoded as UTF-8
///
/// `T` only names the resource in error messages.
#[derive(Debug)]
pub struct DirtyBody<T>(pub String, PhantomData<fn() -> T>);

impl<T> DirtyBody<T> {
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Deserialize)]
struct RawListParams {
    query: Option<String>,
    limit: Option<usize>,
}

/// `?query=<json object>&limit=<n>` of a list request
#[derive(Debug, Default)]
pub struct ListParams {
    pub query: Option<QueryFilter>,
    pub limit: Option<usize>,
}

fn malformed(resource: &'static str, reason: impl Into<String>) -> ServiceError {
    let err = ServiceError::MalformedInput {
        resource,
        reason: reason.into(),
    };
    error!(resource = resource, error = %err, "Rejected request body");
    err
}

/// Buffer the request body. Bodies over the length limit keep their 413.
async fn body_bytes<S>(req: Request, state: &S, resource: &'static str) -> Result<Bytes, ServiceError>
where
    S: Send + Sync,
{
    Bytes::from_request(req, state).await.map_err(|e| {
        if e.status() != StatusCode::PAYLOAD_TOO_LARGE {
            return malformed(resource, e.body_text());
        }
        let err = ServiceError::PayloadTooLarge {
            resource,
            reason: e.body_text(),
        };
        error!(resource = resource, error = %err, "Rejected request body");
        err
    })
}

async fn json_body<S>(req: Request, state: &S, resource: &'static str) -> Result<serde_json::Value, ServiceError>
where
    S: Send + Sync,
{
    let bytes = body_bytes(req, state, resource).await?;
    serde_json::from_slice(&bytes).map_err(|e| malformed(resource, e.to_string()))
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Resource,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = json_body(req, state, T::NAME).await?;

        T::from_json(value).map(ValidatedJson).inspect_err(|e| {
            error!(resource = T::NAME, error = %e, "Rejected request body");
        })
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for UpdateBody<T>
where
    T: Resource,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match json_body(req, state, T::NAME).await? {
            serde_json::Value::Object(values) => Ok(UpdateBody(values, PhantomData)),
            other => Err(malformed(
                T::NAME,
                format!("expected a JSON object of update values, got {}", other),
            )),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for DirtyBody<T>
where
    T: Resource,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = body_bytes(req, state, T::NAME).await?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| malformed(T::NAME, format!("form body is not valid UTF-8: {}", e)))?;
        Ok(DirtyBody(text, PhantomData))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                error!(error = %e, "Rejected list parameters");
                ServiceError::InvalidQuery(e.body_text())
            })?;

        let query = match raw.query.as_deref() {
            None | Some("") => None,
            Some(text) => match serde_json::from_str(text) {
                Ok(serde_json::Value::Object(filter)) => Some(filter),
                Ok(other) => {
                    error!(query = %text, "List filter is not a JSON object");
                    return Err(ServiceError::InvalidQuery(format!(
                        "expected a JSON object, got {}",
                        other
                    )));
                }
                Err(e) => {
                    error!(query = %text, error = %e, "List filter is not valid JSON");
                    return Err(ServiceError::InvalidQuery(e.to_string()));
                }
            },
        };

        Ok(ListParams {
            query,
            limit: Some(raw.limit.unwrap_or(DEFAULT_LIST_LIMIT)),
        })
    }
}

/// Parse a form-encoded body keeping every value of repeated keys.
/// Blank values are dropped.
pub fn parse_dirty_form(body: &str) -> DirtyForm {
    let mut form = DirtyForm::new();
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        if value.trim().is_empty() {
            continue;
        }
        form.entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    form
}
