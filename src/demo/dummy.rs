use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    controllayer::{DirtyForm, Resource},
    errors::{CallbackError, CallbackResult},
};

/// Sample record served by the demo binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DummySchema {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "desc must not be empty"))]
    pub desc: String,
    pub active: bool,
}

impl Resource for DummySchema {
    const NAME: &'static str = "DummySchema";

    fn id(&self) -> String {
        self.id.clone()
    }
}

fn parse_flag(raw: &str) -> CallbackResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(CallbackError::validation(format!(
            "active must be a boolean, got '{}'",
            other
        ))),
    }
}

/// Clean an HTML form submission into a `DummySchema` shaped object.
///
/// Repeated keys keep their first value. An unchecked checkbox is simply
/// absent from the form, so a missing `active` means false.
pub fn clean_dummy_form(
    form: DirtyForm,
) -> CallbackResult<serde_json::Map<String, serde_json::Value>> {
    let mut clean = serde_json::Map::new();

    for (key, values) in form {
        let Some(first) = values.into_iter().next() else {
            continue;
        };

        let value = match key.as_str() {
            "active" => serde_json::Value::Bool(parse_flag(&first)?),
            _ => serde_json::Value::String(first.trim().to_string()),
        };
        clean.insert(key, value);
    }

    clean
        .entry("active")
        .or_insert(serde_json::Value::Bool(false));

    Ok(clean)
}
