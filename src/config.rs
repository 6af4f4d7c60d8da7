use crate::filters::MAX_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValidBand,
    ZeroBaselineSamples,
    InvalidFilterWindow,
    InvalidSpan,
    ZeroAutoscaleWindow,
    InvalidOutputRange,
    InvalidTiming,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidValidBand => {
                write!(f, "valid_raw_min must be less than valid_raw_max")
            }
            ConfigError::ZeroBaselineSamples => write!(f, "baseline_samples must be > 0"),
            ConfigError::InvalidFilterWindow => {
                write!(f, "filter_window must be in range 1..={}", MAX_WINDOW)
            }
            ConfigError::InvalidSpan => write!(f, "min_span must be an even value >= 2"),
            ConfigError::ZeroAutoscaleWindow => write!(f, "autoscale_window must be > 0"),
            ConfigError::InvalidOutputRange => write!(f, "output_max must be > 0"),
            ConfigError::InvalidTiming => {
                write!(f, "poll_interval_us must be > 0 and <= sample_timeout_us")
            }
        }
    }
}

/// Tuning of the conditioning pipeline and its calibration phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Valid samples wanted for the baseline offset. Up to twice as many
    /// attempts are made.
    pub baseline_samples: u16,

    /// Raw samples must be strictly above this to count toward the baseline.
    pub valid_raw_min: u16,

    /// Raw samples must be strictly below this to count toward the baseline.
    pub valid_raw_max: u16,

    /// Offset used when calibration collects no valid samples at all.
    pub fallback_offset: u16,

    /// Moving average depth
    pub filter_window: usize,

    /// Narrowest range the tracker tolerates. Narrower ranges are re-centred
    /// on the current value with half of this on either side.
    pub min_span: u32,

    /// Samples between periodic range contractions.
    pub autoscale_window: u16,

    /// Largest output code (1023 for a 10-bit output).
    pub output_max: u16,

    /// How long a single wait for the sensor-ready signal may take.
    pub sample_timeout_us: u32,

    /// Ready flag poll period while waiting.
    pub poll_interval_us: u32,

    /// Period of repeated fault reports once halted.
    pub fault_repeat_ms: u32,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            baseline_samples: 100,
            valid_raw_min: 100,
            valid_raw_max: 60_000,
            fallback_offset: 1000,
            filter_window: 5,
            min_span: 100,
            autoscale_window: 500,
            output_max: 1023,
            sample_timeout_us: 100_000,
            poll_interval_us: 100,
            fault_repeat_ms: 500,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.valid_raw_min >= self.valid_raw_max {
            return Err(ConfigError::InvalidValidBand);
        }

        if self.baseline_samples == 0 {
            return Err(ConfigError::ZeroBaselineSamples);
        }

        if self.filter_window == 0 || self.filter_window > MAX_WINDOW {
            return Err(ConfigError::InvalidFilterWindow);
        }

        // Expansion is symmetric around the value, so the span must split evenly
        if self.min_span < 2 || self.min_span % 2 != 0 {
            return Err(ConfigError::InvalidSpan);
        }

        if self.autoscale_window == 0 {
            return Err(ConfigError::ZeroAutoscaleWindow);
        }

        if self.output_max == 0 {
            return Err(ConfigError::InvalidOutputRange);
        }

        if self.poll_interval_us == 0 || self.poll_interval_us > self.sample_timeout_us {
            return Err(ConfigError::InvalidTiming);
        }

        Ok(())
    }

    /// Half of `min_span`, applied on each side when the range is expanded.
    pub const fn half_span(&self) -> u32 {
        self.min_span / 2
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
