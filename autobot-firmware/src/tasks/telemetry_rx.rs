//! Companion UART receive task
//!
//! Frames incoming bytes into lines and keeps the latest valid pose.

use autobot_protocol::{LineAssembler, TelemetryFrame};
use defmt::*;
use embassy_stm32::usart::RingBufferedUartRx;
use embedded_io_async::Read;

use crate::telemetry::POSE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn telemetry_rx_task(mut rx: RingBufferedUartRx<'static>) {
    info!("Telemetry RX task started");

    let mut assembler: LineAssembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Ok(Some(line)) => match TelemetryFrame::parse(&line) {
                            Ok(frame) => {
                                trace!("Pose: {:?}", frame);
                                POSE.publish(frame);
                            }
                            Err(e) => {
                                warn!("Dropping telemetry line: {:?}", e);
                                POSE.reject();
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Telemetry framing error: {:?}", e);
                            POSE.reject();
                        }
                    }
                }
            }
            Err(e) => {
                // Overruns drop a partial line; start clean on the next one
                warn!("UART read error: {:?}", e);
                assembler.reset();
            }
        }
    }
}
