pub mod callback;
pub mod errors;

pub use callback::{CallbackError, CallbackResult};
pub use errors::{ErrorDetail, ErrorResponse, ServiceError, ServiceResult};
