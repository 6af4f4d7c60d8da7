//! Adaptive min/max tracking of the filtered signal.
//!
//! The tracked range widens instantly to follow the signal, never stays
//! narrower than `min_span`, and is pulled inward by a tenth of its span each
//! time the autoscale window elapses.

/// Upper end of the sample domain. Also the upper bound after a contraction
/// reset.
pub const SAMPLE_MAX: u32 = u16::MAX as u32;

/// Tracked `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeState {
    pub min: u32,
    pub max: u32,
}

impl RangeState {
    /// Inverted bounds, so the first tracked value always forces expansion.
    pub const SENTINEL: Self = Self {
        min: SAMPLE_MAX,
        max: 0,
    };

    /// Whole sample domain
    pub const FULL: Self = Self {
        min: 0,
        max: SAMPLE_MAX,
    };

    /// `max - min`, or `None` while the bounds are inverted.
    pub fn span(&self) -> Option<u32> {
        self.max.checked_sub(self.min)
    }
}

/// Outcome of one periodic contraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contraction {
    pub before: RangeState,
    pub after: RangeState,
    /// Bounds crossed while shrinking and were reset to [`RangeState::FULL`].
    pub reset: bool,
}

#[derive(Debug, Clone)]
pub struct RangeTracker {
    state: RangeState,
    half_span: u32,
    min_span: u32,
}

impl RangeTracker {
    /// Create a tracker whose narrowest allowed range is `2 * half_span`,
    /// saturating at `u32::MAX`.
    pub const fn new(half_span: u32) -> Self {
        Self {
            state: RangeState::SENTINEL,
            half_span,
            min_span: half_span.saturating_mul(2),
        }
    }

    pub fn state(&self) -> RangeState {
        self.state
    }

    pub fn span(&self) -> Option<u32> {
        self.state.span()
    }

    /// True once the bounds describe a non-empty range
    pub fn is_established(&self) -> bool {
        self.state.max > self.state.min
    }

    /// Widen the bounds to include `value`, then re-centre on `value` if the
    /// range is still narrower than the minimum span.
    pub fn update(&mut self, value: u32) {
        let state = &mut self.state;

        if value < state.min {
            state.min = value;
        }
        if value > state.max {
            state.max = value;
        }

        let narrow = match state.span() {
            Some(span) => span < self.min_span,
            None => true,
        };
        if narrow {
            state.min = value.saturating_sub(self.half_span);
            state.max = value.saturating_add(self.half_span);
        }
    }

    /// Shrink both bounds inward by a tenth of the span.
    ///
    /// Bounds that end up crossed are reset to the full sample domain.
    pub fn contract(&mut self) -> Contraction {
        let before = self.state;

        let min = i64::from(before.min);
        let max = i64::from(before.max);
        let step = (max - min) / 10;
        let new_min = min + step;
        let new_max = max - step;

        let reset = new_min > new_max;
        self.state = if reset {
            RangeState::FULL
        } else {
            // Both stay between the old bounds, so they fit in u32
            RangeState {
                min: new_min as u32,
                max: new_max as u32,
            }
        };

        Contraction {
            before,
            after: self.state,
            reset,
        }
    }
}
