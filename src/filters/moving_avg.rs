use heapless::Vec;

use super::MAX_WINDOW;

/// Simple moving average filter state
///
/// Maintains a zero-filled circular buffer of past samples. Every output is
/// the truncated mean of all `window_size` slots, so the first
/// `window_size - 1` outputs lean toward zero while the buffer fills.
#[derive(Debug, Clone)]
pub struct MovingAvgFilter {
    buffer: Vec<u32, MAX_WINDOW>,
    index: usize,
}

impl MovingAvgFilter {
    /// Create new moving average filter
    ///
    /// window_size must be > 0 and <= MAX_WINDOW
    pub fn new(window_size: usize) -> Self {
        debug_assert!(super::validate_window(window_size).is_ok());

        let mut buffer = Vec::new();
        // Pre-fill buffer with zeros
        for _ in 0..window_size.clamp(1, MAX_WINDOW) {
            let _ = buffer.push(0);
        }

        Self { buffer, index: 0 }
    }

    /// Store `input` and return the truncated mean of the whole window.
    pub fn apply(&mut self, input: u32) -> u32 {
        self.buffer[self.index] = input;
        self.index = (self.index + 1) % self.buffer.len();

        let sum: u64 = self.buffer.iter().map(|&v| u64::from(v)).sum();
        // Mean of u32 values always fits back into u32
        (sum / self.buffer.len() as u64) as u32
    }

    pub fn window_size(&self) -> usize {
        self.buffer.len()
    }
}
