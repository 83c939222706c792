//! Custom request extractors.

mod notification_json;
mod validated_json;

pub use notification_json::NotificationJson;
pub use validated_json::ValidatedJson;
