mod common;

use common::{FakeDelay, Record, RecordingDiagnostics, ScriptedSource, fast_config};
use ppg_conditioner::{Baseline, Config, NoDiagnostics, calibrate};

fn config(baseline_samples: u16) -> Config {
    Config {
        baseline_samples,
        ..fast_config()
    }
}

#[test]
fn offset_is_integer_mean_of_valid_samples() {
    let mut source = ScriptedSource::new([1000, 1001, 1002, 1003, 1005]);
    let mut diag = RecordingDiagnostics::default();
    let mut delay = FakeDelay::default();

    let baseline = calibrate(&mut source, &mut delay, &mut diag, &config(5)).unwrap();

    // 5011 / 5 = 1002.2
    assert_eq!(
        baseline,
        Baseline {
            offset: 1002,
            valid_samples: 5,
            attempts: 5,
            fallback: false,
        }
    );
    assert_eq!(diag.records, [Record::Started(5), Record::Finished(baseline)]);
}

#[test]
fn stops_once_enough_valid_samples_collected() {
    let mut source = ScriptedSource::new([2000, 2000, 2000, 9999]);
    let mut delay = FakeDelay::default();

    let baseline = calibrate(&mut source, &mut delay, &mut NoDiagnostics, &config(3)).unwrap();

    assert_eq!(baseline.offset, 2000);
    assert_eq!(baseline.attempts, 3);
    assert_eq!(source.polls.len(), 1);
}

#[test]
fn out_of_band_samples_are_skipped() {
    // 100 and 60000 are outside the open band, 0xffff is a saturated read
    let mut source = ScriptedSource::new([100, 60_000, 0xffff, 0, 1500, 2500]);
    let mut delay = FakeDelay::default();

    let baseline = calibrate(&mut source, &mut delay, &mut NoDiagnostics, &config(3)).unwrap();

    // Attempt budget of 6 runs out with 2 valid samples
    assert_eq!(baseline.valid_samples, 2);
    assert_eq!(baseline.attempts, 6);
    assert_eq!(baseline.offset, 2000);
    assert!(!baseline.fallback);
}

#[test]
fn timeouts_count_as_attempts() {
    let mut source = ScriptedSource::new([500, 700]);
    let mut delay = FakeDelay::default();

    let baseline = calibrate(&mut source, &mut delay, &mut NoDiagnostics, &config(4)).unwrap();

    assert_eq!(baseline.attempts, 8);
    assert_eq!(baseline.valid_samples, 2);
    assert_eq!(baseline.offset, 600);
    // Six waits of 100 us each timed out
    assert_eq!(delay.total_ns, 6 * 100_000);
}

#[test]
fn no_valid_samples_falls_back_with_warning() {
    let mut source = ScriptedSource::new([0, 50, 65_535, 60_001]);
    let mut diag = RecordingDiagnostics::default();
    let mut delay = FakeDelay::default();

    let baseline = calibrate(&mut source, &mut delay, &mut diag, &config(2)).unwrap();

    assert_eq!(
        baseline,
        Baseline {
            offset: 1000,
            valid_samples: 0,
            attempts: 4,
            fallback: true,
        }
    );
    assert!(diag.records.contains(&Record::Fallback {
        attempts: 4,
        offset: 1000
    }));
}

#[test]
fn silent_sensor_falls_back() {
    let mut source = ScriptedSource::default();
    let mut diag = RecordingDiagnostics::default();
    let cfg = Config {
        fallback_offset: 777,
        ..config(10)
    };

    let baseline = calibrate(&mut source, &mut FakeDelay::default(), &mut diag, &cfg).unwrap();

    assert!(baseline.fallback);
    assert_eq!(baseline.offset, 777);
    assert_eq!(baseline.attempts, 20);
}

#[test]
fn bus_errors_abort_calibration() {
    let mut source = ScriptedSource::new([1200]);
    source.fail_when_empty = true;

    let result = calibrate(&mut source, &mut FakeDelay::default(), &mut NoDiagnostics, &config(5));
    assert_eq!(result, Err(common::BusFault));
}
