//! Notification payload extractor.
//!
//! Accepts any JSON object body. An absent body and an object without keys
//! are both reported as an empty request; field checks happen later in
//! [`NotificationRequest::validate`].

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::domain::NotificationRequest;
use crate::errors::AppError;

pub struct NotificationJson(pub NotificationRequest);

#[async_trait]
impl<S> FromRequest<S> for NotificationJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(empty_body());
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::validation(format!("Malformed JSON body: {}", e)))?;

        match &value {
            Value::Object(map) if map.is_empty() => return Err(empty_body()),
            Value::Object(_) => {}
            _ => return Err(AppError::validation("Request body must be a JSON object")),
        }

        let payload = serde_json::from_value(value)
            .map_err(|e| AppError::validation(format!("Invalid request body: {}", e)))?;

        Ok(NotificationJson(payload))
    }
}

fn empty_body() -> AppError {
    AppError::validation("Empty request body")
}
