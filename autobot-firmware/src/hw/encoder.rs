//! Wheel encoder timers
//!
//! TIM4 (left) and TIM5 (right) run in encoder mode 3, counting every edge
//! of both quadrature inputs. Both are limited to a 16-bit period so the
//! raw count always fits the tracker's `u16`.

use autobot_core::encoder::Wheel;
use autobot_core::traits::{CountDirection, QuadratureCounter};
use defmt::*;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_stm32::pac::timer::vals::{CcmrInputCcs, Dir, Sms};

use super::set_alternate;
use crate::state::ENCODERS;

const AF_TIM4: u8 = 2;
const AF_TIM5: u8 = 2;

/// Encoder counter wrap value
const ENCODER_AUTORELOAD: u16 = 0xFFFF;

/// Encoder-mode timer, addressed through the PAC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCounter {
    Tim4,
    Tim5,
}

impl QuadratureCounter for TimerCounter {
    fn count(&self) -> u16 {
        match self {
            TimerCounter::Tim4 => pac::TIM4.cnt().read().cnt(),
            TimerCounter::Tim5 => pac::TIM5.cnt().read().cnt() as u16,
        }
    }

    fn direction(&self) -> CountDirection {
        let dir = match self {
            TimerCounter::Tim4 => pac::TIM4.cr1().read().dir(),
            TimerCounter::Tim5 => pac::TIM5.cr1().read().dir(),
        };
        match dir {
            Dir::DOWN => CountDirection::Down,
            _ => CountDirection::Up,
        }
    }

    fn autoreload(&self) -> u32 {
        match self {
            TimerCounter::Tim4 => pac::TIM4.arr().read().arr() as u32,
            TimerCounter::Tim5 => pac::TIM5.arr().read().arr(),
        }
    }

    fn set_count(&self, count: u16) {
        match self {
            TimerCounter::Tim4 => pac::TIM4.cnt().write(|w| w.set_cnt(count)),
            TimerCounter::Tim5 => pac::TIM5.cnt().write(|w| w.set_cnt(count as u32)),
        }
    }

    fn start(&self) {
        match self {
            TimerCounter::Tim4 => pac::TIM4.cr1().modify(|w| w.set_cen(true)),
            TimerCounter::Tim5 => pac::TIM5.cr1().modify(|w| w.set_cen(true)),
        }
    }
}

/// Put both timers in encoder mode and unmask their update interrupts
///
/// Counting starts when the tracker calls [`QuadratureCounter::start`].
pub fn configure() {
    pac::RCC.apb1enr().modify(|w| {
        w.set_tim4en(true);
        w.set_tim5en(true);
    });

    set_alternate(pac::GPIOD, 12, AF_TIM4);
    set_alternate(pac::GPIOD, 13, AF_TIM4);
    set_alternate(pac::GPIOA, 0, AF_TIM5);
    set_alternate(pac::GPIOA, 1, AF_TIM5);

    let tim4 = pac::TIM4;
    tim4.ccmr_input(0).modify(|w| {
        w.set_ccs(0, CcmrInputCcs::TI4);
        w.set_ccs(1, CcmrInputCcs::TI4);
    });
    tim4.smcr().modify(|w| w.set_sms(Sms::ENCODER_MODE_3));
    tim4.arr().write(|w| w.set_arr(ENCODER_AUTORELOAD));
    tim4.sr().modify(|w| w.set_uif(false));
    tim4.dier().modify(|w| w.set_uie(true));

    let tim5 = pac::TIM5;
    tim5.ccmr_input(0).modify(|w| {
        w.set_ccs(0, CcmrInputCcs::TI4);
        w.set_ccs(1, CcmrInputCcs::TI4);
    });
    tim5.smcr().modify(|w| w.set_sms(Sms::ENCODER_MODE_3));
    tim5.arr().write(|w| w.set_arr(ENCODER_AUTORELOAD as u32));
    tim5.sr().modify(|w| w.set_uif(false));
    tim5.dier().modify(|w| w.set_uie(true));

    // Overflow handlers preempt the capture handlers
    interrupt::TIM4.set_priority(Priority::P0);
    interrupt::TIM5.set_priority(Priority::P0);
    // SAFETY: handlers below only touch the encoder trackers
    unsafe {
        interrupt::TIM4.enable();
        interrupt::TIM5.enable();
    }

    info!("Encoder timers configured");
}

#[interrupt]
fn TIM4() {
    let tim4 = pac::TIM4;
    if tim4.sr().read().uif() {
        tim4.sr().modify(|w| w.set_uif(false));
        ENCODERS.on_overflow(Wheel::Left);
    }
}

#[interrupt]
fn TIM5() {
    let tim5 = pac::TIM5;
    if tim5.sr().read().uif() {
        tim5.sr().modify(|w| w.set_uif(false));
        ENCODERS.on_overflow(Wheel::Right);
    }
}
