//! Single-wheel H-bridge output
//!
//! Dual H-bridge boards such as the L298N take one PWM enable line and two
//! direction inputs per motor. Direction inputs high/low drive forward,
//! low/high drive in reverse, both low let the motor coast.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// Signed wheel speed, percent of full PWM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelSpeed {
    Forward(u8),
    Reverse(u8),
    Stopped,
}

/// Something that can spin one wheel
pub trait WheelOutput {
    /// Apply a speed; failures are ignored
    fn set_speed(&mut self, speed: WheelSpeed);
}

/// One motor channel of an H-bridge
pub struct HBridge<P, A, B> {
    pwm: P,
    in_a: A,
    in_b: B,
    speed: WheelSpeed,
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> HBridge<P, A, B> {
    /// Wrap a channel; the motor starts stopped
    pub fn new(pwm: P, in_a: A, in_b: B) -> Self {
        let mut bridge = Self {
            pwm,
            in_a,
            in_b,
            speed: WheelSpeed::Stopped,
        };
        bridge.set_speed(WheelSpeed::Stopped);
        bridge
    }

    /// Last commanded speed
    pub fn speed(&self) -> WheelSpeed {
        self.speed
    }

    #[cfg(test)]
    fn release(self) -> (P, A, B) {
        (self.pwm, self.in_a, self.in_b)
    }
}

impl<P: SetDutyCycle, A: OutputPin, B: OutputPin> WheelOutput for HBridge<P, A, B> {
    fn set_speed(&mut self, speed: WheelSpeed) {
        self.speed = speed;

        // Errors are dropped: the next control tick re-issues the command
        let _ = match speed {
            WheelSpeed::Stopped => self.pwm.set_duty_cycle_fully_off(),
            WheelSpeed::Forward(percent) | WheelSpeed::Reverse(percent) => {
                self.pwm.set_duty_cycle_percent(percent.min(100))
            }
        };
        let (a_high, b_high) = match speed {
            WheelSpeed::Forward(_) => (true, false),
            WheelSpeed::Reverse(_) => (false, true),
            WheelSpeed::Stopped => (false, false),
        };
        let _ = self.in_a.set_state(a_high.into());
        let _ = self.in_b.set_state(b_high.into());
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
    use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

    pub const MAX_DUTY: u16 = 1000;

    #[derive(Default)]
    pub struct MockPwm {
        pub duty: u16,
    }

    impl PwmErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            MAX_DUTY
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockPin {
        pub high: bool,
    }

    impl PinErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }
}
