//! Board wiring and register-level timer glue
//!
//! Pin map (NUCLEO-F446ZE):
//!
//! | function            | pin   | peripheral   |
//! |---------------------|-------|--------------|
//! | sonar 1 trigger     | PA15  | TIM2 CH1     |
//! | sonar 1 echo        | PB3   | TIM2 CH2     |
//! | sonar 2 trigger     | PA2   | TIM2 CH3     |
//! | sonar 2 echo        | PA3   | TIM2 CH4     |
//! | sonar 3 trigger     | PB4   | TIM3 CH1     |
//! | sonar 3 echo        | PB5   | TIM3 CH2     |
//! | left encoder A/B    | PD12/PD13 | TIM4 CH1/CH2 |
//! | right encoder A/B   | PA0/PA1   | TIM5 CH1/CH2 |
//! | left motor PWM      | PE9   | TIM1 CH1     |
//! | right motor PWM     | PE11  | TIM1 CH2     |
//! | left motor IN1/IN2  | PF12/PF13 | GPIO     |
//! | right motor IN1/IN2 | PF14/PF15 | GPIO     |
//! | IR array, L to R    | PB0, PA4, PG2, PC0 | GPIO |
//! | companion UART      | PA9 TX, PA10 RX | USART1 |

pub mod encoder;
pub mod sonar;

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals::Moder;

/// Timer kernel clock with the default clock tree (16 MHz HSI, APB
/// prescalers at 1)
pub const TIMER_CLOCK_HZ: u32 = 16_000_000;

/// Hand a pin to a timer alternate function
///
/// Timer pins are driven through the PAC directly, so they are never
/// claimed from the HAL peripheral set.
fn set_alternate(port: pac::gpio::Gpio, pin: usize, af: u8) {
    port.afr(pin / 8).modify(|w| w.set_afr(pin % 8, af));
    port.moder().modify(|w| w.set_moder(pin, Moder::ALTERNATE));
}
