use crate::calibrator::Baseline;
use crate::error::Fault;
use crate::pipeline::Pipeline;

/// Monitor lifecycle. `Streaming` and `Faulted` are never left.
pub enum Phase {
    /// Sensor init sequence not yet applied.
    Configuring,
    /// Baseline not yet measured.
    Calibrating,
    Streaming {
        baseline: Baseline,
        pipeline: Pipeline,
    },
    Faulted(Fault),
}

impl Phase {
    pub fn is_streaming(&self) -> bool {
        matches!(self, Phase::Streaming { .. })
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            Phase::Faulted(fault) => Some(*fault),
            _ => None,
        }
    }
}
