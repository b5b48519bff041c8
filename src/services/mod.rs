pub mod http_request;

pub use http_request::{HttpRequest, HttpResponse, RequestOptions, RequestType};
