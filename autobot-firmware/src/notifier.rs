//! Queue-backed notification sink

use autobot_core::traits::Notifier;
use autobot_protocol::Notification;
use defmt::*;

use crate::channels::NOTIFY_CHANNEL;

/// Hands notifications to the UART transmit task without waiting
pub struct QueueNotifier;

impl Notifier for QueueNotifier {
    fn notify(&mut self, notification: Notification) {
        if NOTIFY_CHANNEL.try_send(notification).is_err() {
            warn!("Notification queue full, dropping {:?}", notification);
        }
    }
}
