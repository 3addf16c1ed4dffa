//! # Notifications
//!
//! Transient status messages ("Product added successfully!", "SKU already
//! exists...") shown to the user one at a time.
//!
//! [`Notifier`] is the fire-and-forget sending side handed to workflows.
//! [`NotificationDispatcher`] drains the queue in submission order, shows each
//! message for a fixed interval, and publishes the one currently on screen
//! (or `None`) through a `watch` channel any front end can observe.
//!
//! The `watch` channel only holds the latest value, so a short display
//! interval can hide a message from a slow observer. Callers that must see
//! every message use [`Notifier::tap`], which receives each one as it is queued.

use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Sending side of the notification queue. Cheap to clone.
#[derive(Clone)]
pub struct Notifier {
    queue: mpsc::UnboundedSender<Notification>,
    shown: watch::Receiver<Option<Notification>>,
    tap: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Queues a notification. Never blocks and never fails; once the
    /// dispatcher has stopped the message is dropped.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        // No tap receivers is the normal case.
        let _ = self.tap.send(notification.clone());
        if let Err(rejected) = self.queue.send(notification) {
            debug!(message = %rejected.0.message, "Dispatcher stopped, notification dropped");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Observes the notification currently on screen.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.shown.clone()
    }

    /// Receives every notification queued after this call, whether or not it
    /// has been shown yet.
    pub fn tap(&self) -> broadcast::Receiver<Notification> {
        self.tap.subscribe()
    }
}

const TAP_CAPACITY: usize = 16;

/// Shows queued notifications one at a time.
pub struct NotificationDispatcher {
    queue: mpsc::UnboundedReceiver<Notification>,
    shown: watch::Sender<Option<Notification>>,
    display_for: Duration,
}

/// Creates a dispatcher and the notifier that feeds it.
pub fn channel(display_for: Duration) -> (NotificationDispatcher, Notifier) {
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    let (shown_tx, shown_rx) = watch::channel(None);
    let (tap, _) = broadcast::channel(TAP_CAPACITY);
    let dispatcher = NotificationDispatcher {
        queue: queue_rx,
        shown: shown_tx,
        display_for,
    };
    let notifier = Notifier {
        queue: queue_tx,
        shown: shown_rx,
        tap,
    };
    (dispatcher, notifier)
}

impl NotificationDispatcher {
    /// Runs until every [`Notifier`] is dropped and the queue is empty.
    pub async fn run(mut self) {
        while let Some(notification) = self.queue.recv().await {
            info!(severity = ?notification.severity, message = %notification.message, "Notify");
            self.shown.send_replace(Some(notification));
            tokio::time::sleep(self.display_for).await;
            self.shown.send_replace(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_notifications_show_one_at_a_time_in_order() {
        let (dispatcher, notifier) = channel(Duration::from_secs(3));
        let mut shown = notifier.subscribe();

        notifier.success("first");
        notifier.error("second");

        let start = Instant::now();
        tokio::spawn(dispatcher.run());

        let mut seen = Vec::new();
        loop {
            shown.changed().await.expect("Dispatcher stopped early");
            let current = shown.borrow_and_update().clone();
            match current {
                Some(n) => seen.push((n.message, n.severity, start.elapsed())),
                None if seen.len() == 2 => break,
                None => {}
            }
        }

        assert_eq!(
            seen,
            vec![
                ("first".to_string(), Severity::Success, Duration::ZERO),
                ("second".to_string(), Severity::Error, Duration::from_secs(3)),
            ]
        );
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_notify_after_dispatcher_stops_is_silent() {
        let (dispatcher, notifier) = channel(Duration::from_millis(1));
        drop(dispatcher);

        notifier.error("nobody is listening");
        assert!(notifier.subscribe().borrow().is_none());
    }

    #[tokio::test]
    async fn test_tap_sees_messages_cleared_before_observed() {
        let (dispatcher, notifier) = channel(Duration::ZERO);
        let mut tap = notifier.tap();
        tokio::spawn(dispatcher.run());

        notifier.success("saved");
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Already shown and cleared, but the tap kept it.
        assert!(notifier.subscribe().borrow().is_none());
        let seen = tap.try_recv().expect("Expected a tapped notification");
        assert_eq!(seen.message, "saved");
        assert_eq!(seen.severity, Severity::Success);
        assert!(tap.try_recv().is_err());
    }
}
