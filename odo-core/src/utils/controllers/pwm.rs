//! Bounded analog output for the motor path.
//!
//! Thin wrapper over a PWM channel: a signed speed in `[-1, 1]` is clamped
//! to a configured symmetric limit and mapped to a duty cycle centered at
//! 50%, the neutral point of the motor controller. Motion control itself
//! lives outside this crate.

use embedded_hal::pwm::SetDutyCycle;

/// PWM output with a symmetric speed clamp.
pub struct BoundedPwm<T> {
    output: T,
    limit: f64,
}

impl<T: SetDutyCycle> BoundedPwm<T> {
    /// Wrap `output` with a full-scale limit of 1.0.
    pub fn new(output: T) -> Self {
        BoundedPwm { output, limit: 1.0 }
    }

    /// Adjust the symmetric clamp. Values outside `[0, 1]` are brought back
    /// into range.
    pub fn config_limit(
        &mut self,
        limit: f64,
    ) {
        self.limit = limit.clamp(0.0, 1.0);
    }

    /// Drive the output at `speed` in `[-1, 1]`, clamped to the configured
    /// limit. -1 is full reverse, 0 is neutral (50% duty), 1 is full forward.
    pub fn set(
        &mut self,
        speed: f64,
    ) -> Result<(), T::Error> {
        let clamped = speed.clamp(-self.limit, self.limit);
        let max = self.output.max_duty_cycle();
        let duty = ((clamped + 1.0) / 2.0 * f64::from(max)) as u16;
        self.output.set_duty_cycle(duty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::pwm::{Mock as PwmMock, Transaction as PwmTransaction};

    #[test]
    fn neutral_speed_is_half_duty() {
        let expectations = [
            PwmTransaction::max_duty_cycle(1000),
            PwmTransaction::set_duty_cycle(500),
        ];
        let mut pwm = BoundedPwm::new(PwmMock::new(&expectations));
        pwm.set(0.0).unwrap();
        pwm.output.done();
    }

    #[test]
    fn limit_clamps_both_directions() {
        let expectations = [
            PwmTransaction::max_duty_cycle(1000),
            PwmTransaction::set_duty_cycle(900),
            PwmTransaction::max_duty_cycle(1000),
            PwmTransaction::set_duty_cycle(100),
        ];
        let mut pwm = BoundedPwm::new(PwmMock::new(&expectations));
        pwm.config_limit(0.8);
        pwm.set(1.0).unwrap();
        pwm.set(-2.5).unwrap();
        pwm.output.done();
    }
}
