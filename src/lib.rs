// Library exports for testing
pub mod config;
pub mod controllayer;
pub mod demo;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;

pub use controllayer::{RequestContext, Resource};
pub use errors::{CallbackError, CallbackResult, ServiceError, ServiceResult};
pub use routes::ApiShell;
