//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use autobot_protocol::Notification;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Pending stop/resume tokens; a full queue drops new ones
const NOTIFY_CHANNEL_SIZE: usize = 4;

/// Notifications from the line follower to the companion UART
pub static NOTIFY_CHANNEL: Channel<CriticalSectionRawMutex, Notification, NOTIFY_CHANNEL_SIZE> =
    Channel::new();
