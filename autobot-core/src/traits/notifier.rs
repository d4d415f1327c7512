//! Companion notification sink

use autobot_protocol::Notification;

/// Non-blocking sender for stop/resume notifications
///
/// `notify` must return immediately. If the transport is busy the
/// implementation may queue or drop the notification, but must never wait.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}
