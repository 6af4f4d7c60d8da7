//! Human-readable progress and fault reporting.
//!
//! Nothing reported here feeds back into the signal path.

use crate::calibrator::Baseline;
use crate::error::Fault;
use crate::range::Contraction;

/// Receiver of status events. Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait Diagnostics {
    fn calibration_started(&mut self, wanted_samples: u16) {}

    fn calibration_finished(&mut self, baseline: &Baseline) {}

    /// No valid baseline sample arrived; the fallback offset is in use.
    fn calibration_fallback(&mut self, attempts: u32, fallback_offset: u16) {}

    fn range_contracted(&mut self, contraction: &Contraction) {}

    /// The sensor-ready signal did not arrive within the sample timeout.
    fn sample_timeout(&mut self, timeout_us: u32) {}

    /// Repeated for as long as the monitor stays halted.
    fn fault(&mut self, fault: Fault) {}
}

impl<T: Diagnostics + ?Sized> Diagnostics for &mut T {
    fn calibration_started(&mut self, wanted_samples: u16) {
        (**self).calibration_started(wanted_samples)
    }

    fn calibration_finished(&mut self, baseline: &Baseline) {
        (**self).calibration_finished(baseline)
    }

    fn calibration_fallback(&mut self, attempts: u32, fallback_offset: u16) {
        (**self).calibration_fallback(attempts, fallback_offset)
    }

    fn range_contracted(&mut self, contraction: &Contraction) {
        (**self).range_contracted(contraction)
    }

    fn sample_timeout(&mut self, timeout_us: u32) {
        (**self).sample_timeout(timeout_us)
    }

    fn fault(&mut self, fault: Fault) {
        (**self).fault(fault)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// Forwards events to the `log` facade.
#[cfg(feature = "log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

#[cfg(feature = "log")]
impl Diagnostics for LogDiagnostics {
    fn calibration_started(&mut self, wanted_samples: u16) {
        log::info!(
            "baseline calibration: collecting {} samples, keep the sensor uncovered",
            wanted_samples
        );
    }

    fn calibration_finished(&mut self, baseline: &Baseline) {
        log::info!(
            "baseline calibration done: offset {} from {} samples in {} attempts",
            baseline.offset,
            baseline.valid_samples,
            baseline.attempts
        );
    }

    fn calibration_fallback(&mut self, attempts: u32, fallback_offset: u16) {
        log::warn!(
            "no valid baseline samples in {} attempts, using fallback offset {}",
            attempts,
            fallback_offset
        );
    }

    fn range_contracted(&mut self, contraction: &Contraction) {
        if contraction.reset {
            log::info!(
                "autoscale: range [{}, {}] collapsed, reset to [{}, {}]",
                contraction.before.min,
                contraction.before.max,
                contraction.after.min,
                contraction.after.max
            );
        } else {
            log::debug!(
                "autoscale: range [{}, {}] -> [{}, {}]",
                contraction.before.min,
                contraction.before.max,
                contraction.after.min,
                contraction.after.max
            );
        }
    }

    fn sample_timeout(&mut self, timeout_us: u32) {
        log::warn!("no sample within {} us", timeout_us);
    }

    fn fault(&mut self, fault: Fault) {
        log::error!("halted: {}", fault);
    }
}
