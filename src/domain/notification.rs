//! Notification request and recipient validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// local-part@domain.tld with no whitespace and a single `@`
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check an address against the simple syntactic email pattern.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

/// Incoming `/notifier` payload.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub receivers: Option<Vec<String>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A `receivers` value that is not a JSON array counts as absent.
/// Non-string items keep their JSON text so they are reported as invalid.
fn list_or_absent<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(None),
    };

    Ok(Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    ))
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub targets: Vec<String>,
    pub title: String,
    pub html: String,
}

/// Body returned once a notification was handed to the mail relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationAccepted {
    pub msg: String,
    pub to: Vec<String>,
    pub title: String,
    pub html: String,
}

impl From<Notification> for NotificationAccepted {
    fn from(n: Notification) -> Self {
        Self {
            msg: "✅ Message accepted".to_string(),
            to: n.targets,
            title: n.title,
            html: n.html,
        }
    }
}

impl NotificationRequest {
    /// Resolve the target list: a non-empty `receiver` wins, otherwise
    /// `receivers` as given.
    pub fn targets(&self) -> Vec<String> {
        match self.receiver.as_deref() {
            Some(receiver) if !receiver.is_empty() => vec![receiver.to_string()],
            _ => self.receivers.clone().unwrap_or_default(),
        }
    }

    /// Validate the payload, in the order the gateway reports problems.
    pub fn validate(self) -> AppResult<Notification> {
        let targets = self.targets();
        let title = self.title.filter(|t| !t.is_empty());
        let message = self.message.filter(|m| !m.is_empty());
        let (Some(title), Some(html)) = (title, message) else {
            return Err(AppError::validation(
                "'title' and 'message' are required",
            ));
        };

        if targets.is_empty() {
            return Err(AppError::validation(
                "Provide 'receiver' or 'receivers' field",
            ));
        }

        let invalid: Vec<&str> = targets
            .iter()
            .map(String::as_str)
            .filter(|t| !is_valid_email(t))
            .collect();
        if !invalid.is_empty() {
            return Err(AppError::validation(format!(
                "Invalid email(s): {}",
                invalid.join(", ")
            )));
        }

        Ok(Notification {
            targets,
            title,
            html,
        })
    }
}
