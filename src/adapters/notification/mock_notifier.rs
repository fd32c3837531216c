//! Mock Notifier for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{Notification, NotificationError, Notifier};

/// Records every notification it accepts. Can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    attempts: Arc<Mutex<usize>>,
    failing: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that rejects every notification until `set_failing(false)`.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Notifications accepted so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    /// Calls made, including rejected ones.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        *self.attempts.lock().unwrap() += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::rejected(503, "mock notifier is failing"));
        }

        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification::new("subject", "body", "team@example.com")
    }

    #[tokio::test]
    async fn records_accepted_notifications() {
        let notifier = MockNotifier::new();

        notifier.notify(&notification()).await.unwrap();

        assert_eq!(notifier.sent(), vec![notification()]);
        assert_eq!(notifier.attempts(), 1);
    }

    #[tokio::test]
    async fn failing_notifier_counts_attempts_but_records_nothing() {
        let notifier = MockNotifier::failing();

        assert!(notifier.notify(&notification()).await.is_err());

        assert!(notifier.sent().is_empty());
        assert_eq!(notifier.attempts(), 1);
    }

    #[tokio::test]
    async fn can_recover_after_failing() {
        let notifier = MockNotifier::failing();
        let _ = notifier.notify(&notification()).await;

        notifier.set_failing(false);
        notifier.notify(&notification()).await.unwrap();

        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.attempts(), 2);
    }
}
