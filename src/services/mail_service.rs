//! Mail dispatcher - Mirrors a notification into the task tracker, then
//! emails it.
//!
//! The two side effects are independent: the tracker call is best effort
//! and its failure is logged and discarded; the email send is the primary
//! effect and its failure is returned to the caller. Neither is retried.

use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{DailyLogger, Mailer, TaskTracker};

/// Sends notifications through the configured collaborators.
#[derive(Clone)]
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
    tracker: Arc<dyn TaskTracker>,
    logger: DailyLogger,
}

impl MailDispatcher {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        tracker: Arc<dyn TaskTracker>,
        logger: DailyLogger,
    ) -> Self {
        Self {
            mailer,
            tracker,
            logger,
        }
    }

    /// Send one HTML email to all `targets`.
    pub async fn send_email(&self, targets: &[String], subject: &str, html: &str) -> AppResult<()> {
        if let Err(e) = self.tracker.notify(subject, html).await {
            self.logger
                .error(format!("Task tracker notification failed: {}", e));
        }

        match self.mailer.send_html(targets, subject, html).await {
            Ok(()) => {
                self.logger
                    .info(format!("Email sent to: {}", targets.join(", ")));
                Ok(())
            }
            Err(e) => {
                self.logger.error(format!("sendEmail error: {}", e));
                Err(AppError::mail(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::smtp::{MailError, MockMailer};
    use crate::infra::task_tracker::{MockTaskTracker, TaskTrackerError};
    use std::fs;

    fn read_log(logger: &DailyLogger) -> String {
        fs::read_dir(logger.dir())
            .unwrap()
            .map(|e| fs::read_to_string(e.unwrap().path()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_sends_one_message_to_all_targets() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());

        let mut tracker = MockTaskTracker::new();
        tracker
            .expect_notify()
            .withf(|title, html| title == "T" && html == "<p>hi</p>")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_html()
            .withf(|targets, subject, html| {
                targets == ["a@b.com".to_string(), "c@d.com".to_string()]
                    && subject == "T"
                    && html == "<p>hi</p>"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let dispatcher = MailDispatcher::new(Arc::new(mailer), Arc::new(tracker), logger.clone());
        let targets = vec!["a@b.com".to_string(), "c@d.com".to_string()];
        dispatcher.send_email(&targets, "T", "<p>hi</p>").await.unwrap();

        assert!(read_log(&logger).contains("[INFO] Email sent to: a@b.com, c@d.com"));
    }

    #[tokio::test]
    async fn test_tracker_failure_does_not_block_email() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());

        let mut tracker = MockTaskTracker::new();
        tracker
            .expect_notify()
            .times(1)
            .returning(|_, _| Err(TaskTrackerError::NotConfigured("ASANA_TOKEN")));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_html()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let dispatcher = MailDispatcher::new(Arc::new(mailer), Arc::new(tracker), logger.clone());
        let result = dispatcher
            .send_email(&["a@b.com".to_string()], "T", "m")
            .await;

        assert!(result.is_ok());
        let log = read_log(&logger);
        assert!(log.contains("[ERROR] Task tracker notification failed"));
        assert!(log.contains("[INFO] Email sent to: a@b.com"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());

        let mut tracker = MockTaskTracker::new();
        tracker.expect_notify().times(1).returning(|_, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_html()
            .times(1)
            .returning(|_, _, _| Err(MailError::NoRecipients));

        let dispatcher = MailDispatcher::new(Arc::new(mailer), Arc::new(tracker), logger.clone());
        let err = dispatcher
            .send_email(&["a@b.com".to_string()], "T", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Mail(_)));
        let log = read_log(&logger);
        assert!(log.contains("[ERROR] sendEmail error: no recipients"));
        assert!(!log.contains("Email sent to"));
    }
}
