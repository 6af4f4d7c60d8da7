//! Optical front-end access over a register bus.
//!
//! The sensor's register map stays opaque: a [`SensorProfile`] carries the
//! init writes and the few addresses the pipeline needs.

#![deny(unsafe_code)]

mod i2c;

pub use i2c::I2cRegisterBus;

use portable_atomic::{AtomicBool, Ordering};

use crate::source::SampleSource;

/// Register-addressed bus carrying 16-bit payloads.
pub trait RegisterBus {
    type Error: core::fmt::Debug;

    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error>;

    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error> {
        (**self).write_register(address, value)
    }

    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error> {
        (**self).read_register(address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError<E> {
    Bus(E),
    /// Status register did not read back the running value after init.
    NotRunning { status: u16 },
}

impl<E> From<E> for SensorError<E> {
    fn from(error: E) -> Self {
        SensorError::Bus(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::Bus(error) => write!(f, "sensor bus error: {:?}", error),
            SensorError::NotRunning { status } => {
                write!(f, "sensor not running after init (status {:#06x})", status)
            }
        }
    }
}

/// Init sequence and data addresses of a particular front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorProfile<'a> {
    /// `(address, value)` writes applied in order: reset, FIFO clear,
    /// sampling, gain and timing.
    pub init: &'a [(u8, u16)],
    pub status_register: u8,
    /// Status value of a sensor that is producing samples.
    pub running_value: u16,
    /// Output queue register, one sample per read.
    pub fifo_data: u8,
}

/// Apply the profile's init writes, then confirm the sensor reports running.
pub fn configure_sensor<B>(
    bus: &mut B,
    profile: &SensorProfile<'_>,
) -> Result<(), SensorError<B::Error>>
where
    B: RegisterBus + ?Sized,
{
    for &(address, value) in profile.init {
        bus.write_register(address, value)?;
    }

    let status = bus.read_register(profile.status_register)?;
    if status != profile.running_value {
        return Err(SensorError::NotRunning { status });
    }

    Ok(())
}

/// Sample-ready flag shared between the sensor interrupt and the main loop.
///
/// The interrupt handler only calls [`ReadyFlag::signal`]; all bus traffic
/// stays in the main loop.
#[derive(Debug)]
pub struct ReadyFlag {
    ready: AtomicBool,
}

impl ReadyFlag {
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    pub fn signal(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Consume a pending signal.
    pub fn take(&self) -> bool {
        self.ready.swap(false, Ordering::Acquire)
    }

    pub fn is_set(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for ReadyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// [`SampleSource`] reading FIFO_DATA whenever the ready flag was signalled.
pub struct SensorSource<'a, B> {
    bus: B,
    ready: &'a ReadyFlag,
    profile: SensorProfile<'a>,
}

impl<'a, B: RegisterBus> SensorSource<'a, B> {
    pub fn new(bus: B, ready: &'a ReadyFlag, profile: SensorProfile<'a>) -> Self {
        Self { bus, ready, profile }
    }

    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> SampleSource for SensorSource<'_, B> {
    type Error = SensorError<B::Error>;

    fn configure(&mut self) -> Result<(), Self::Error> {
        configure_sensor(&mut self.bus, &self.profile)
    }

    fn poll_sample(&mut self) -> Result<Option<u16>, Self::Error> {
        if !self.ready.take() {
            return Ok(None);
        }
        let raw = self.bus.read_register(self.profile.fifo_data)?;
        Ok(Some(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: [(u8, u16); 3] = [(0x01, 0x8000), (0x02, 0x0000), (0x10, 0x1234)];

    const PROFILE: SensorProfile<'static> = SensorProfile {
        init: &INIT,
        status_register: 0x30,
        running_value: 0x0001,
        fifo_data: 0x2a,
    };

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, u16)>,
        reads: Vec<u8>,
        status: u16,
        fifo: u16,
    }

    impl RegisterBus for RecordingBus {
        type Error = ();

        fn write_register(&mut self, address: u8, value: u16) -> Result<(), ()> {
            self.writes.push((address, value));
            Ok(())
        }

        fn read_register(&mut self, address: u8) -> Result<u16, ()> {
            self.reads.push(address);
            match address {
                0x30 => Ok(self.status),
                0x2a => Ok(self.fifo),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn configure_writes_table_in_order() {
        let mut bus = RecordingBus {
            status: 1,
            ..Default::default()
        };
        configure_sensor(&mut bus, &PROFILE).unwrap();
        assert_eq!(bus.writes, INIT.to_vec());
        assert_eq!(bus.reads, [0x30]);
    }

    #[test]
    fn configure_detects_stopped_sensor() {
        let mut bus = RecordingBus {
            status: 0,
            ..Default::default()
        };
        assert_eq!(
            configure_sensor(&mut bus, &PROFILE),
            Err(SensorError::NotRunning { status: 0 })
        );
    }

    #[test]
    fn ready_flag_is_consumed_once() {
        let flag = ReadyFlag::new();
        assert!(!flag.take());
        flag.signal();
        flag.signal();
        assert!(flag.is_set());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn source_reads_fifo_only_when_signalled() {
        let flag = ReadyFlag::new();
        let bus = RecordingBus {
            fifo: 4321,
            ..Default::default()
        };
        let mut source = SensorSource::new(bus, &flag, PROFILE);

        assert_eq!(source.poll_sample(), Ok(None));
        assert!(source.bus().reads.is_empty());

        flag.signal();
        assert_eq!(source.poll_sample(), Ok(Some(4321)));
        assert_eq!(source.poll_sample(), Ok(None));
        assert_eq!(source.release().reads, [0x2a]);
    }
}
