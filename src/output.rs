use embedded_hal::pwm::SetDutyCycle;

use crate::config::ConfigError;

/// Fixed-resolution analog output accepting codes in `[0, output_max]`.
pub trait OutputSink {
    type Error: core::fmt::Debug;

    fn write_code(&mut self, code: u16) -> Result<(), Self::Error>;
}

impl<O: OutputSink + ?Sized> OutputSink for &mut O {
    type Error = O::Error;

    fn write_code(&mut self, code: u16) -> Result<(), Self::Error> {
        (**self).write_code(code)
    }
}

/// Drives an output code onto a PWM channel as a fraction of full duty.
///
/// Meant for boards without a DAC, behind an RC low-pass.
pub struct PwmOutput<P> {
    pwm: P,
    output_max: u16,
}

impl<P: SetDutyCycle> PwmOutput<P> {
    /// `output_max` is the code mapped to full duty and must be > 0.
    pub fn new(pwm: P, output_max: u16) -> Result<Self, ConfigError> {
        if output_max == 0 {
            return Err(ConfigError::InvalidOutputRange);
        }
        Ok(Self { pwm, output_max })
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> OutputSink for PwmOutput<P> {
    type Error = P::Error;

    fn write_code(&mut self, code: u16) -> Result<(), Self::Error> {
        self.pwm
            .set_duty_cycle_fraction(code.min(self.output_max), self.output_max)
    }
}
