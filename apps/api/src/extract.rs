use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections are reported through `AppError`, so a body
/// with a non-integer `conversation_id` still gets the envelope (422).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
