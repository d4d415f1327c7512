//! Ultrasonic trigger and echo capture timers
//!
//! Each timer both fires the triggers (PWM mode 1, one short pulse per
//! period) and captures the echoes. TIM2 channels capture on a selectable
//! edge; TIM3 CH2 captures on both edges and is handled by the toggling
//! channel. The update interrupt of each timer marks the start of a trigger
//! period and puts its echo channels back in step.

use autobot_core::config::SonarConfig;
use autobot_core::sonar::{CaptureEdge, CaptureEvent, EchoOutcome, SonarId};
use defmt::*;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_stm32::pac::timer::vals::{CcmrInputCcs, Ocm};

use super::{set_alternate, TIMER_CLOCK_HZ};
use crate::state::ECHO;

const AF_TIM2: u8 = 1;
const AF_TIM3: u8 = 2;

/// Capture channels wired to an echo line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
enum CaptureSource {
    Tim2Ch2,
    Tim2Ch4,
    Tim3Ch2,
}

impl CaptureSource {
    /// Zero-based timer channel index
    const fn channel(self) -> usize {
        match self {
            CaptureSource::Tim2Ch2 => 1,
            CaptureSource::Tim2Ch4 => 3,
            CaptureSource::Tim3Ch2 => 1,
        }
    }

    const fn sonar(self) -> SonarId {
        match self {
            CaptureSource::Tim2Ch2 => SonarId::Sonar1,
            CaptureSource::Tim2Ch4 => SonarId::Sonar2,
            CaptureSource::Tim3Ch2 => SonarId::Sonar3,
        }
    }

    const fn event(self, edge: CaptureEdge, tick: u32) -> CaptureEvent {
        match self {
            CaptureSource::Tim2Ch2 => CaptureEvent::Sonar1 { edge, tick },
            CaptureSource::Tim2Ch4 => CaptureEvent::Sonar2 { edge, tick },
            CaptureSource::Tim3Ch2 => CaptureEvent::Sonar3 { tick },
        }
    }
}

/// Configure both sonar timers and start ranging
pub fn init(config: &SonarConfig) {
    pac::RCC.apb1enr().modify(|w| {
        w.set_tim2en(true);
        w.set_tim3en(true);
    });

    let psc = (TIMER_CLOCK_HZ as u64 * config.tick_ns as u64 / 1_000_000_000).saturating_sub(1);
    let psc = u16::try_from(psc).unwrap_or(u16::MAX);
    // build.rs rejects periods that overflow TIM3, so both fit in 16 bits
    let period = config.period_ticks().saturating_sub(1);
    let pulse = config.us_to_ticks(config.trigger_pulse_us).max(1);

    set_alternate(pac::GPIOA, 15, AF_TIM2);
    set_alternate(pac::GPIOB, 3, AF_TIM2);
    set_alternate(pac::GPIOA, 2, AF_TIM2);
    set_alternate(pac::GPIOA, 3, AF_TIM2);
    set_alternate(pac::GPIOB, 4, AF_TIM3);
    set_alternate(pac::GPIOB, 5, AF_TIM3);

    // TIM2: 32-bit, triggers on CH1/CH3, echoes on CH2/CH4
    let tim2 = pac::TIM2;
    tim2.psc().write_value(psc);
    tim2.arr().write(|w| w.set_arr(period));
    for pair in 0..2 {
        tim2.ccmr_output(pair).modify(|w| {
            w.set_ocm(0, Ocm::PWM_MODE1);
            w.set_ocpe(0, true);
        });
        // Odd channel of each pair captures its own input
        tim2.ccmr_input(pair).modify(|w| w.set_ccs(1, CcmrInputCcs::TI4));
    }
    tim2.ccr(0).write(|w| w.set_ccr(pulse));
    tim2.ccr(2).write(|w| w.set_ccr(pulse));
    tim2.ccer().modify(|w| {
        for ch in [0, 2] {
            w.set_cce(ch, true);
        }
        for ch in [1, 3] {
            w.set_ccp(ch, false);
            w.set_ccnp(ch, false);
            w.set_cce(ch, true);
        }
    });
    tim2.egr().write(|w| w.set_ug(true));
    tim2.sr().modify(|w| w.set_uif(false));
    tim2.dier().modify(|w| {
        w.set_uie(true);
        w.set_ccie(CaptureSource::Tim2Ch2.channel(), true);
        w.set_ccie(CaptureSource::Tim2Ch4.channel(), true);
    });

    // TIM3: 16-bit, trigger on CH1, echo on CH2 capturing both edges
    let tim3 = pac::TIM3;
    tim3.psc().write_value(psc);
    tim3.arr().write(|w| w.set_arr(period as u16));
    tim3.ccmr_output(0).modify(|w| {
        w.set_ocm(0, Ocm::PWM_MODE1);
        w.set_ocpe(0, true);
    });
    tim3.ccmr_input(0).modify(|w| w.set_ccs(1, CcmrInputCcs::TI4));
    tim3.ccr(0).write(|w| w.set_ccr(pulse as u16));
    tim3.ccer().modify(|w| {
        w.set_cce(0, true);
        w.set_ccp(1, true);
        w.set_ccnp(1, true);
        w.set_cce(1, true);
    });
    tim3.egr().write(|w| w.set_ug(true));
    tim3.sr().modify(|w| w.set_uif(false));
    tim3.dier().modify(|w| {
        w.set_uie(true);
        w.set_ccie(CaptureSource::Tim3Ch2.channel(), true);
    });

    interrupt::TIM2.set_priority(Priority::P1);
    interrupt::TIM3.set_priority(Priority::P1);
    // SAFETY: handlers below only touch the lock-free echo state
    unsafe {
        interrupt::TIM2.enable();
        interrupt::TIM3.enable();
    }

    tim2.cr1().modify(|w| w.set_cen(true));
    tim3.cr1().modify(|w| w.set_cen(true));

    info!(
        "Sonar timers running: psc={} period={} pulse={} ticks",
        psc, period, pulse
    );
}

fn handle(source: CaptureSource, edge: CaptureEdge, tick: u32) -> EchoOutcome {
    let outcome = ECHO.on_capture(source.event(edge, tick));
    match outcome {
        EchoOutcome::Discarded(reason) => warn!("{}: echo discarded ({})", source, reason),
        EchoOutcome::Measured(cm) => trace!("{}: {} cm", source, cm),
        EchoOutcome::PulseStarted => {}
    }
    outcome
}

fn period_start(source: CaptureSource) {
    if let Some(reason) = ECHO.on_period_start(source.sonar()) {
        warn!("{}: echo lost ({})", source, reason);
    }
}

#[interrupt]
fn TIM2() {
    let tim2 = pac::TIM2;
    let status = tim2.sr().read();

    for source in [CaptureSource::Tim2Ch2, CaptureSource::Tim2Ch4] {
        let ch = source.channel();
        if !status.ccif(ch) {
            continue;
        }
        // Reading CCR clears the capture flag
        let tick = tim2.ccr(ch).read().ccr();
        let edge = if tim2.ccer().read().ccp(ch) {
            CaptureEdge::Falling
        } else {
            CaptureEdge::Rising
        };

        let outcome = handle(source, edge, tick);
        let falling_next = outcome.next_edge() == CaptureEdge::Falling;
        tim2.ccer().modify(|w| w.set_ccp(ch, falling_next));
    }

    // Captures pending with the update belong to the previous period
    if status.uif() {
        tim2.sr().modify(|w| w.set_uif(false));
        for source in [CaptureSource::Tim2Ch2, CaptureSource::Tim2Ch4] {
            period_start(source);
            tim2.ccer().modify(|w| w.set_ccp(source.channel(), false));
        }
    }
}

#[interrupt]
fn TIM3() {
    let tim3 = pac::TIM3;
    let source = CaptureSource::Tim3Ch2;
    let ch = source.channel();
    let status = tim3.sr().read();
    if status.ccif(ch) {
        let tick = tim3.ccr(ch).read().ccr() as u32;
        // Polarity is fixed to both edges; the toggling channel decides
        handle(source, CaptureEdge::Rising, tick);
    }
    if status.uif() {
        tim3.sr().modify(|w| w.set_uif(false));
        period_start(source);
    }
}
