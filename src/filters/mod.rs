/// Smoothing filters
///
/// Filters operate on offset-corrected samples in integer space.
mod moving_avg;

pub use moving_avg::MovingAvgFilter;

/// Largest supported moving average depth. RAM cost: MAX_WINDOW * 4 bytes.
pub const MAX_WINDOW: usize = 32;

/// Check a moving average depth before building a filter with it
pub const fn validate_window(window_size: usize) -> Result<(), &'static str> {
    if window_size == 0 {
        return Err("MovingAverage window_size must be > 0");
    }
    if window_size > MAX_WINDOW {
        return Err("MovingAverage window_size must be <= 32");
    }
    Ok(())
}
