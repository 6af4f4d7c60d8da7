//! Baseline (dark signal) calibration.
//!
//! Run once at startup with nothing on the sensing surface. The mean of the
//! in-band samples becomes the offset subtracted from every later reading.

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::source::{SampleSource, wait_for_sample};

/// Result of a calibration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub offset: u16,
    pub valid_samples: u16,
    pub attempts: u32,
    /// No valid sample arrived and `offset` is the configured fallback.
    pub fallback: bool,
}

/// Running mean over in-band raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    valid_min: u16,
    valid_max: u16,
    count: u16,
    sum: u32,
}

impl Calibration {
    /// Accept samples strictly between `valid_min` and `valid_max`.
    pub const fn new(valid_min: u16, valid_max: u16) -> Self {
        Self {
            valid_min,
            valid_max,
            count: 0,
            sum: 0,
        }
    }

    pub fn is_valid(&self, raw: u16) -> bool {
        raw > self.valid_min && raw < self.valid_max
    }

    /// Add `raw` if it is in band and there is room. Returns whether it was
    /// kept.
    pub fn add_sample(&mut self, raw: u16) -> bool {
        if !self.is_valid(raw) || self.count == u16::MAX {
            return false;
        }
        self.count += 1;
        self.sum += u32::from(raw);
        true
    }

    pub fn num_samples(&self) -> u16 {
        self.count
    }

    /// Truncated mean of the kept samples, `None` if there are none.
    pub fn mean(&self) -> Option<u16> {
        if self.count == 0 {
            return None;
        }
        // Mean of u16 values fits in u16
        Some((self.sum / u32::from(self.count)) as u16)
    }
}

/// Collect up to `config.baseline_samples` in-band samples within twice as
/// many attempts and return their mean.
///
/// Every wait counts as one attempt, including waits that time out. Falls
/// back to `config.fallback_offset` (and warns) when nothing valid arrives.
pub fn calibrate<S, D, G>(
    source: &mut S,
    delay: &mut D,
    diagnostics: &mut G,
    config: &Config,
) -> Result<Baseline, S::Error>
where
    S: SampleSource + ?Sized,
    D: DelayNs + ?Sized,
    G: Diagnostics + ?Sized,
{
    let wanted = config.baseline_samples;
    let max_attempts = 2 * u32::from(wanted);

    diagnostics.calibration_started(wanted);

    let mut calibration = Calibration::new(config.valid_raw_min, config.valid_raw_max);
    let mut attempts = 0;

    while attempts < max_attempts && calibration.num_samples() < wanted {
        attempts += 1;
        let sample = wait_for_sample(
            source,
            delay,
            config.sample_timeout_us,
            config.poll_interval_us,
        )?;
        if let Some(raw) = sample {
            calibration.add_sample(raw);
        }
    }

    let baseline = match calibration.mean() {
        Some(offset) => Baseline {
            offset,
            valid_samples: calibration.num_samples(),
            attempts,
            fallback: false,
        },
        None => {
            diagnostics.calibration_fallback(attempts, config.fallback_offset);
            Baseline {
                offset: config.fallback_offset,
                valid_samples: 0,
                attempts,
                fallback: true,
            }
        }
    };

    diagnostics.calibration_finished(&baseline);
    Ok(baseline)
}
