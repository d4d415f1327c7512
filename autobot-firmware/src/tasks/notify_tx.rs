//! Companion UART transmit task
//!
//! Writes stop/resume tokens queued by the line follower.

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use embedded_io_async::Write;

use crate::channels::NOTIFY_CHANNEL;

#[embassy_executor::task]
pub async fn notify_tx_task(mut tx: UartTx<'static, Async>) {
    info!("Notify TX task started");

    loop {
        let notification = NOTIFY_CHANNEL.receive().await;
        match tx.write_all(notification.as_bytes()).await {
            Ok(()) => debug!("Sent {:?}", notification),
            Err(e) => warn!("Failed to send {:?}: {:?}", notification, e),
        }
    }
}
