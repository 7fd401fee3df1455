use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business code for a successful call.
pub const SUCCESS: i32 = 0;
/// Generic failure code.
pub const FAIL: i32 = 500;

/// `Authorization` header missing.
pub const ERR_TOKEN_NOT_EXIST: i32 = 1201;
/// Token expired.
pub const ERR_TOKEN_RUNTIME: i32 = 1202;
/// Token failed verification.
pub const ERR_TOKEN_WRONG: i32 = 1203;
/// User was forced offline by an administrator.
pub const ERR_FORCE_OFFLINE: i32 = 1207;

/// Envelope every backend endpoint answers with.
///
/// `data` stays untyped until the code has been checked: on failures the
/// backend puts an error detail string there instead of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

impl ApiResponse<Value> {
    /// Text shown to the user for a failed call: the message, followed by the
    /// detail when the backend sent one that differs from it.
    pub fn error_text(&self) -> String {
        match &self.data {
            Some(Value::Null) | None => self.message.clone(),
            Some(Value::String(detail)) if detail == &self.message || detail.is_empty() => {
                self.message.clone()
            }
            Some(Value::String(detail)) => format!("{} {}", self.message, detail),
            Some(other) => format!("{} {}", self.message, other),
        }
    }

    /// Decode the payload into a concrete type.
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> Result<Option<T>, serde_json::Error> {
        match self.data {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some),
        }
    }
}
