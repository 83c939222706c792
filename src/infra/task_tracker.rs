//! Task tracker integration (Asana).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ASANA_TASKS_URL};

#[cfg(test)]
use mockall::automock;

/// Task tracker errors
#[derive(Error, Debug)]
pub enum TaskTrackerError {
    #[error("task tracker not configured: {0} is missing")]
    NotConfigured(&'static str),

    #[error("task tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("task tracker rejected the task ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Receives a copy of every notification.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskTracker: Send + Sync {
    async fn notify(&self, title: &str, html: &str) -> Result<(), TaskTrackerError>;
}

#[derive(Debug, Serialize)]
struct CreateTask<'a> {
    data: TaskData<'a>,
}

#[derive(Debug, Serialize)]
struct TaskData<'a> {
    name: &'a str,
    notes: &'a str,
    projects: [&'a str; 1],
}

/// Creates one Asana task per notification.
pub struct AsanaTracker {
    client: Client,
    token: Option<String>,
    project_id: Option<String>,
}

impl AsanaTracker {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            token: config.asana_token().map(str::to_string),
            project_id: config.asana_project_id.clone(),
        }
    }
}

#[async_trait]
impl TaskTracker for AsanaTracker {
    async fn notify(&self, title: &str, html: &str) -> Result<(), TaskTrackerError> {
        let token = self
            .token
            .as_deref()
            .ok_or(TaskTrackerError::NotConfigured("ASANA_TOKEN"))?;
        let project = self
            .project_id
            .as_deref()
            .ok_or(TaskTrackerError::NotConfigured("ASANA_PROJECT_ID"))?;

        let body = CreateTask {
            data: TaskData {
                name: title,
                notes: html,
                projects: [project],
            },
        };

        let response = self
            .client
            .post(ASANA_TASKS_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskTrackerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(title = %title, "Task tracker notified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_tracker_fails() {
        let tracker = AsanaTracker::from_config(&Config::with_secret("s"));
        let err = tracker.notify("t", "<p>m</p>").await.unwrap_err();
        assert!(matches!(err, TaskTrackerError::NotConfigured("ASANA_TOKEN")));
    }

    #[test]
    fn test_task_payload_shape() {
        let body = CreateTask {
            data: TaskData {
                name: "Disk full",
                notes: "<p>hi</p>",
                projects: ["1200"],
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": { "name": "Disk full", "notes": "<p>hi</p>", "projects": ["1200"] }
            })
        );
    }
}
