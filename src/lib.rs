#![cfg_attr(not(test), no_std)]

mod config;
mod state;
mod pipeline;
mod error;
pub mod calibrator;
pub mod diagnostics;
pub mod filters;
pub mod monitor;
pub mod offset;
pub mod output;
pub mod range;
pub mod scaler;
pub mod sensor;
pub mod source;

pub use config::{Config, ConfigError};
pub use state::Phase;
pub use pipeline::{Ingest, Pipeline};
pub use error::{Error, Fault};
pub use calibrator::{Baseline, Calibration, calibrate};
pub use diagnostics::{Diagnostics, NoDiagnostics};
pub use monitor::{Event, Monitor};
pub use offset::correct;
pub use output::{OutputSink, PwmOutput};
pub use range::{Contraction, RangeState, RangeTracker};
pub use scaler::scale;
pub use sensor::{
    I2cRegisterBus, ReadyFlag, RegisterBus, SensorError, SensorProfile, SensorSource,
    configure_sensor,
};
pub use source::{SampleSource, wait_for_sample};

#[cfg(feature = "log")]
pub use diagnostics::LogDiagnostics;
