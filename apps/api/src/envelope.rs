use axum::Json;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Success";

/// Uniform `{data, message, error}` body returned by every operation.
/// Failures carry `data: null`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub error: bool,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: SUCCESS_MESSAGE.to_string(),
            error: false,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            error: true,
        }
    }
}

/// Shorthand for a handler's successful return value.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::success(data))
}
