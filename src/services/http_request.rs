use reqwest::{Method, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};
use tracing::Level;
use uuid::Uuid;

use crate::errors::{ServiceError, ServiceResult};

/// HTTP verbs the client helper can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestType {
    Post,
    Get,
    Delete,
    Put,
    Patch,
    Head,
    Options,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Post => "POST",
            RequestType::Get => "GET",
            RequestType::Delete => "DELETE",
            RequestType::Put => "PUT",
            RequestType::Patch => "PATCH",
            RequestType::Head => "HEAD",
            RequestType::Options => "OPTIONS",
        }
    }

    fn method(&self) -> Method {
        match self {
            RequestType::Post => Method::POST,
            RequestType::Get => Method::GET,
            RequestType::Delete => Method::DELETE,
            RequestType::Put => Method::PUT,
            RequestType::Patch => Method::PATCH,
            RequestType::Head => Method::HEAD,
            RequestType::Options => Method::OPTIONS,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POST" => Ok(RequestType::Post),
            "GET" => Ok(RequestType::Get),
            "DELETE" => Ok(RequestType::Delete),
            "PUT" => Ok(RequestType::Put),
            "PATCH" => Ok(RequestType::Patch),
            "HEAD" => Ok(RequestType::Head),
            "OPTIONS" => Ok(RequestType::Options),
            other => Err(format!("Unsupported request type: {}", other)),
        }
    }
}

/// Per-request knobs of [`HttpRequest::request`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub bearer_token: Option<String>,
    pub log_level: Level,
    pub label: Option<String>,
    /// Correlation id for the log lines, generated when absent
    pub request_id: Option<String>,
    pub form: Option<Vec<(String, String)>>,
    pub json: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            bearer_token: None,
            log_level: Level::INFO,
            label: None,
            request_id: None,
            form: None,
            json: None,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_form<K, V>(mut self, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form = Some(form.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn with_json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }
}

/// Response of an outbound call, body already read for logging
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub request_id: String,
    pub status: reqwest::StatusCode,
    pub headers: header::HeaderMap,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ServiceResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| ServiceError::ExternalServiceError {
            service: "http".to_string(),
            reason: format!("Response body is not valid JSON: {}", e),
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// tracing needs the level at compile time, so dispatch on it here
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        if $level == Level::ERROR {
            tracing::error!($($arg)+)
        } else if $level == Level::WARN {
            tracing::warn!($($arg)+)
        } else if $level == Level::INFO {
            tracing::info!($($arg)+)
        } else if $level == Level::DEBUG {
            tracing::debug!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    };
}

fn label_prefix(label: Option<&str>) -> String {
    label.map(|l| format!("[{}]: ", l)).unwrap_or_default()
}

/// Outbound HTTP client that logs every call with a correlation id
#[derive(Debug, Clone)]
pub struct HttpRequest {
    client: reqwest::Client,
}

impl HttpRequest {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send a request and read its body.
    /// Non-2xx statuses are returned as responses; only transport failures are errors.
    pub async fn request(
        &self,
        method: RequestType,
        url: &str,
        options: RequestOptions,
    ) -> ServiceResult<HttpResponse> {
        let request_id = options
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let prefix = label_prefix(options.label.as_deref());

        let mut builder = self.client.request(method.method(), url);
        if let Some(token) = &options.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(form) = &options.form {
            builder = builder.form(form);
        }
        if let Some(json) = &options.json {
            builder = builder.json(json);
        }

        log_at!(
            options.log_level,
            request_id = %request_id,
            method = %method,
            url = %url,
            "{}{} @URL: {} [{}]",
            prefix,
            method,
            url,
            request_id
        );

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                url = %url,
                error = %e,
                "{}{} @URL: {} failed [{}]",
                prefix,
                method,
                url,
                request_id
            );
            ServiceError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ServiceError::from)?.to_vec();
        let elapsed = started.elapsed();

        log_at!(
            options.log_level,
            request_id = %request_id,
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "{}{} @URL: {} returned {} [{}] in {} ms\n{}",
            prefix,
            method,
            url,
            status.as_u16(),
            request_id,
            elapsed.as_millis(),
            String::from_utf8_lossy(&body)
        );

        Ok(HttpResponse {
            request_id,
            status,
            headers,
            body,
            elapsed,
        })
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Get, url, options).await
    }

    pub async fn post(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Post, url, options).await
    }

    pub async fn put(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Put, url, options).await
    }

    pub async fn patch(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Patch, url, options).await
    }

    pub async fn delete(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Delete, url, options).await
    }

    pub async fn head(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Head, url, options).await
    }

    pub async fn options(&self, url: &str, options: RequestOptions) -> ServiceResult<HttpResponse> {
        self.request(RequestType::Options, url, options).await
    }
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}
