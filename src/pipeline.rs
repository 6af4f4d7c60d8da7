use crate::config::{Config, ConfigError};
use crate::filters::MovingAvgFilter;
use crate::offset::correct;
use crate::range::{Contraction, RangeState, RangeTracker};
use crate::scaler::scale;

/// Intermediate values of one processed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingest {
    pub corrected: u16,
    pub filtered: u32,
    /// Range the code was scaled against.
    pub range: RangeState,
    pub code: u16,
    /// Set when this sample closed an autoscale window.
    pub contraction: Option<Contraction>,
}

/// Streaming signal path: offset correction, smoothing, range tracking and
/// scaling to output codes.
pub struct Pipeline {
    offset: u16,
    filter: MovingAvgFilter,
    range: RangeTracker,
    counter: u16,
    autoscale_window: u16,
    output_max: u16,
}

impl Pipeline {
    pub fn new(config: &Config, offset: u16) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            offset,
            filter: MovingAvgFilter::new(config.filter_window),
            range: RangeTracker::new(config.half_span()),
            counter: 0,
            autoscale_window: config.autoscale_window,
            output_max: config.output_max,
        })
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn range(&self) -> RangeState {
        self.range.state()
    }

    /// Samples since the last contraction
    pub fn counter(&self) -> u16 {
        self.counter
    }

    /// Process one raw sample and return its output code.
    pub fn ingest(&mut self, raw: u16) -> u16 {
        self.ingest_detailed(raw).code
    }

    pub fn ingest_detailed(&mut self, raw: u16) -> Ingest {
        let corrected = correct(raw, self.offset);
        let filtered = self.filter.apply(u32::from(corrected));

        self.range.update(filtered);
        let range = self.range.state();
        let code = scale(filtered, range.min, range.max, self.output_max);

        // Contract after scaling so the new bounds apply from the next sample
        self.counter += 1;
        let contraction = if self.counter >= self.autoscale_window {
            self.counter = 0;
            Some(self.range.contract())
        } else {
            None
        };

        Ingest {
            corrected,
            filtered,
            range,
            code,
            contraction,
        }
    }
}
