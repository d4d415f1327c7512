//! AutoBot - Line Following Robot Firmware
//!
//! Main firmware binary for the STM32F446-based AutoBot chassis. Follows a
//! taped line with four IR sensors, ranges obstacles with three ultrasonic
//! sensors, tracks both wheels with quadrature encoders and reports stop
//! markers to a companion camera board over UART.

#![no_std]
#![no_main]

use autobot_core::control::LineFollower;
use autobot_drivers::line::IrArray;
use autobot_drivers::motor::{DifferentialDrive, HBridge};
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::peripherals::USART1;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::usart::{self, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::config::ROBOT_CONFIG;
use crate::notifier::QueueNotifier;
use crate::state::{ECHO, ENCODERS};

mod channels;
mod config;
mod hw;
mod notifier;
mod state;
mod tasks;
mod telemetry;

bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<USART1>;
});

/// DMA ring buffer for the companion UART (must live forever)
static RX_RING: StaticCell<[u8; 256]> = StaticCell::new();

/// Companion link baud rate
const COMPANION_BAUD: u32 = 115_200;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("AutoBot firmware starting...");

    let config = ROBOT_CONFIG;
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Rangefinders and encoders run entirely from interrupts
    hw::sonar::init(ECHO.config());
    hw::encoder::configure();
    ENCODERS.init();
    info!("Sensors armed");

    // Motors: TIM1 CH1/CH2 PWM into the H-bridge enables
    let pwm = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new(p.PE9, OutputType::PushPull)),
        Some(PwmPin::new(p.PE11, OutputType::PushPull)),
        None,
        None,
        Hertz(config.drive.pwm_frequency_hz),
        CountingMode::EdgeAlignedUp,
    );
    let mut channels = pwm.split();
    channels.ch1.enable();
    channels.ch2.enable();

    let left = HBridge::new(
        channels.ch1,
        Output::new(p.PF12, Level::Low, Speed::Low),
        Output::new(p.PF13, Level::Low, Speed::Low),
    );
    let right = HBridge::new(
        channels.ch2,
        Output::new(p.PF14, Level::Low, Speed::Low),
        Output::new(p.PF15, Level::Low, Speed::Low),
    );
    let drive = DifferentialDrive::new(left, right, &config.drive);
    let follower = LineFollower::new(config.line, drive, QueueNotifier);

    // IR array, leftmost sensor first
    let sensors = IrArray::new([
        Input::new(p.PB0, Pull::None),
        Input::new(p.PA4, Pull::None),
        Input::new(p.PG2, Pull::None),
        Input::new(p.PC0, Pull::None),
    ]);

    // Companion UART
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = COMPANION_BAUD;

    let uart = Uart::new(
        p.USART1,
        p.PA10, // RX
        p.PA9,  // TX
        Irqs,
        p.DMA2_CH7,
        p.DMA2_CH2,
        uart_config,
    )
    .unwrap();
    let (tx, rx) = uart.split();
    let rx = rx.into_ring_buffered(RX_RING.init([0u8; 256]));
    info!("UART initialized for companion link");

    spawner
        .spawn(tasks::line_follow_task(follower, sensors, config.control.tick_ms))
        .unwrap();
    spawner.spawn(tasks::notify_tx_task(tx)).unwrap();
    spawner.spawn(tasks::telemetry_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::status_task(config.control.status_interval_ms))
        .unwrap();

    info!("All tasks spawned");
}
