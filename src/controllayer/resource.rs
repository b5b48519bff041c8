use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use validator::Validate;

use crate::errors::{ServiceError, ServiceResult};

/// A record type served by an [`ApiShell`](crate::routes::ApiShell).
///
/// The shell never looks inside a resource beyond its id; everything else is
/// opaque and round-trips through serde.
pub trait Resource:
    Serialize + DeserializeOwned + Validate + Clone + Debug + Send + Sync + 'static
{
    /// Human readable name used in log lines and error messages
    const NAME: &'static str;

    /// Primary key of the record
    fn id(&self) -> String;

    /// Build a record from loose JSON, running field validation
    fn from_json(value: serde_json::Value) -> ServiceResult<Self> {
        let item: Self =
            serde_json::from_value(value).map_err(|e| ServiceError::MalformedInput {
                resource: Self::NAME,
                reason: e.to_string(),
            })?;

        item.validate().map_err(|e| ServiceError::MalformedInput {
            resource: Self::NAME,
            reason: e.to_string(),
        })?;

        Ok(item)
    }
}
