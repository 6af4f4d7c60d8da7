//! Event loop tying the sensor, the conditioning pipeline and the output
//! together.
//!
//! Single-threaded: the only concurrency is the sensor interrupt setting the
//! ready flag behind the [`SampleSource`].

use embedded_hal::delay::DelayNs;

use crate::calibrator::{Baseline, calibrate};
use crate::config::{Config, ConfigError};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::output::OutputSink;
use crate::pipeline::Pipeline;
use crate::source::{SampleSource, wait_for_sample};
use crate::state::Phase;

/// What a single [`Monitor::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Configured,
    Calibrated(Baseline),
    /// A sample was processed and this code written to the output.
    Output(u16),
    /// No sample arrived within the sample timeout.
    Timeout,
}

pub struct Monitor<S, O, D, G> {
    config: Config,
    source: S,
    output: O,
    delay: D,
    diagnostics: G,
    phase: Phase,
}

impl<S, O, D, G> Monitor<S, O, D, G>
where
    S: SampleSource,
    O: OutputSink,
    D: DelayNs,
    G: Diagnostics,
{
    pub fn new(
        config: Config,
        source: S,
        output: O,
        delay: D,
        diagnostics: G,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            output,
            delay,
            diagnostics,
            phase: Phase::Configuring,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        match &self.phase {
            Phase::Streaming { baseline, .. } => Some(baseline),
            _ => None,
        }
    }

    pub fn pipeline(&self) -> Option<&Pipeline> {
        match &self.phase {
            Phase::Streaming { pipeline, .. } => Some(pipeline),
            _ => None,
        }
    }

    pub fn diagnostics(&self) -> &G {
        &self.diagnostics
    }

    pub fn release(self) -> (S, O, D, G) {
        (self.source, self.output, self.delay, self.diagnostics)
    }

    /// Perform one unit of work for the current phase.
    ///
    /// A fatal error moves the monitor to the faulted phase. From then on
    /// every call re-reports the fault, waits `fault_repeat_ms` and returns
    /// [`Error::Halted`].
    pub fn step(&mut self) -> Result<Event, Error<S::Error, O::Error>> {
        let result = match self.phase {
            Phase::Configuring => self.configure(),
            Phase::Calibrating => self.calibrate(),
            Phase::Streaming { .. } => self.stream(),
            Phase::Faulted(fault) => {
                self.diagnostics.fault(fault);
                self.delay.delay_ms(self.config.fault_repeat_ms);
                return Err(Error::Halted(fault));
            }
        };

        if let Err(error) = &result {
            if let Some(fault) = error.fault() {
                self.diagnostics.fault(fault);
                self.phase = Phase::Faulted(fault);
            }
        }
        result
    }

    /// Step forever. After a fatal error this keeps signalling the fault.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.step();
        }
    }

    fn configure(&mut self) -> Result<Event, Error<S::Error, O::Error>> {
        self.source.configure().map_err(Error::Configuration)?;
        self.phase = Phase::Calibrating;
        Ok(Event::Configured)
    }

    fn calibrate(&mut self) -> Result<Event, Error<S::Error, O::Error>> {
        let baseline = calibrate(
            &mut self.source,
            &mut self.delay,
            &mut self.diagnostics,
            &self.config,
        )
        .map_err(Error::Source)?;

        let pipeline = Pipeline::new(&self.config, baseline.offset)?;
        self.phase = Phase::Streaming { baseline, pipeline };
        Ok(Event::Calibrated(baseline))
    }

    fn stream(&mut self) -> Result<Event, Error<S::Error, O::Error>> {
        let Phase::Streaming { pipeline, .. } = &mut self.phase else {
            return Ok(Event::Timeout);
        };

        let sample = wait_for_sample(
            &mut self.source,
            &mut self.delay,
            self.config.sample_timeout_us,
            self.config.poll_interval_us,
        )
        .map_err(Error::Source)?;

        let Some(raw) = sample else {
            self.diagnostics.sample_timeout(self.config.sample_timeout_us);
            return Ok(Event::Timeout);
        };

        let ingest = pipeline.ingest_detailed(raw);
        if let Some(contraction) = &ingest.contraction {
            self.diagnostics.range_contracted(contraction);
        }

        self.output.write_code(ingest.code).map_err(Error::Output)?;
        Ok(Event::Output(ingest.code))
    }
}
