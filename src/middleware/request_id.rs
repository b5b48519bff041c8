use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware to attach a correlation id to each request
/// An inbound `x-request-id` carrying a UUID is reused, otherwise a new one is generated.
/// The id is stored in the request extensions and echoed in the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::new_v4);

    request.extensions_mut().insert(request_id);

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Incoming request"
    );

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    response
}

/// Extract request ID from request extensions
pub fn get_request_id(request: &Request) -> Option<Uuid> {
    request.extensions().get::<Uuid>().copied()
}

pub fn request_id_from_parts(parts: &Parts) -> Option<Uuid> {
    parts.extensions.get::<Uuid>().copied()
}
