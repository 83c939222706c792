//! Notification handler.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::NotificationJson;
use crate::api::AppState;
use crate::domain::NotificationAccepted;
use crate::errors::{AppError, AppResult};

/// Create notification routes
pub fn notifier_routes() -> Router<AppState> {
    Router::new().route("/notifier", post(notify))
}

/// Validate a notification and hand it to the mail dispatcher
pub async fn notify(
    State(state): State<AppState>,
    payload: Result<NotificationJson, AppError>,
) -> AppResult<Json<NotificationAccepted>> {
    let notification = payload
        .and_then(|NotificationJson(request)| request.validate())
        .map_err(|e| {
            state.logger.warning(format!("Rejected notification: {}", e));
            e
        })?;

    let recipients = notification.targets.join(", ");
    state
        .logger
        .info(format!("Notification to {} — {}", recipients, notification.title));

    if let Err(e) = state
        .dispatcher
        .send_email(&notification.targets, &notification.title, &notification.html)
        .await
    {
        state
            .logger
            .error(format!("Notification to {} failed: {:?}", recipients, e));
        return Err(e);
    }

    Ok(Json(notification.into()))
}
