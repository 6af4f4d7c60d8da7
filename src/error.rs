#![deny(unsafe_code)]

use crate::config::ConfigError;

/// Kind of fatal failure that halted the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Sensor never reached its running state.
    Configuration,
    /// Bus failure while acquiring samples.
    Source,
    /// Output driver rejected a code.
    Output,
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Fault::Configuration => write!(f, "sensor configuration failed"),
            Fault::Source => write!(f, "sample acquisition failed"),
            Fault::Output => write!(f, "output write failed"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Error<SE, OE> {
    Config(ConfigError),
    Configuration(SE),
    Source(SE),
    Output(OE),
    /// Returned by every step after a fatal error.
    Halted(Fault),
}

impl<SE, OE> Error<SE, OE> {
    /// Fault tag for fatal errors, `None` for a rejected config.
    pub fn fault(&self) -> Option<Fault> {
        match self {
            Error::Config(_) => None,
            Error::Configuration(_) => Some(Fault::Configuration),
            Error::Source(_) => Some(Fault::Source),
            Error::Output(_) => Some(Fault::Output),
            Error::Halted(fault) => Some(*fault),
        }
    }
}

impl<SE, OE> From<ConfigError> for Error<SE, OE> {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl<SE, OE> core::fmt::Display for Error<SE, OE>
where
    SE: core::fmt::Debug,
    OE: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(error) => write!(f, "invalid config: {}", error),
            Error::Configuration(error) => write!(f, "sensor configuration failed: {:?}", error),
            Error::Source(error) => write!(f, "sample acquisition failed: {:?}", error),
            Error::Output(error) => write!(f, "output write failed: {:?}", error),
            Error::Halted(fault) => write!(f, "halted after fault: {}", fault),
        }
    }
}
