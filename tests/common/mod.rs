#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use ppg_conditioner::{Baseline, Config, Contraction, Diagnostics, Fault, OutputSink, SampleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Source replaying a script, one entry per poll. `None` entries and an
/// exhausted script both read as "not ready".
#[derive(Default)]
pub struct ScriptedSource {
    pub polls: VecDeque<Option<u16>>,
    pub configure_fails: bool,
    pub fail_when_empty: bool,
    pub configured: bool,
    pub poll_count: usize,
}

impl ScriptedSource {
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        Self {
            polls: samples.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }
}

impl SampleSource for ScriptedSource {
    type Error = BusFault;

    fn configure(&mut self) -> Result<(), BusFault> {
        if self.configure_fails {
            return Err(BusFault);
        }
        self.configured = true;
        Ok(())
    }

    fn poll_sample(&mut self) -> Result<Option<u16>, BusFault> {
        self.poll_count += 1;
        match self.polls.pop_front() {
            Some(entry) => Ok(entry),
            None if self.fail_when_empty => Err(BusFault),
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct RecordingOutput {
    pub codes: Vec<u16>,
    pub fail: bool,
}

impl OutputSink for RecordingOutput {
    type Error = BusFault;

    fn write_code(&mut self, code: u16) -> Result<(), BusFault> {
        if self.fail {
            return Err(BusFault);
        }
        self.codes.push(code);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Started(u16),
    Finished(Baseline),
    Fallback { attempts: u32, offset: u16 },
    Contracted(Contraction),
    Timeout(u32),
    Fault(Fault),
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub records: Vec<Record>,
}

impl RecordingDiagnostics {
    pub fn faults(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, Record::Fault(_)))
            .count()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn calibration_started(&mut self, wanted_samples: u16) {
        self.records.push(Record::Started(wanted_samples));
    }

    fn calibration_finished(&mut self, baseline: &Baseline) {
        self.records.push(Record::Finished(*baseline));
    }

    fn calibration_fallback(&mut self, attempts: u32, fallback_offset: u16) {
        self.records.push(Record::Fallback {
            attempts,
            offset: fallback_offset,
        });
    }

    fn range_contracted(&mut self, contraction: &Contraction) {
        self.records.push(Record::Contracted(*contraction));
    }

    fn sample_timeout(&mut self, timeout_us: u32) {
        self.records.push(Record::Timeout(timeout_us));
    }

    fn fault(&mut self, fault: Fault) {
        self.records.push(Record::Fault(fault));
    }
}

/// Defaults with a short wait so timeouts cost only two polls.
pub fn fast_config() -> Config {
    Config {
        sample_timeout_us: 100,
        poll_interval_us: 100,
        fault_repeat_ms: 5,
        ..Config::default()
    }
}
