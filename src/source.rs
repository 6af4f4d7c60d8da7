use embedded_hal::delay::DelayNs;

/// Producer of raw sensor samples.
pub trait SampleSource {
    type Error: core::fmt::Debug;

    /// Bring the sensor into its running state.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Fetch a sample if one is ready. Never blocks waiting for one.
    fn poll_sample(&mut self) -> Result<Option<u16>, Self::Error>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    type Error = S::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        (**self).configure()
    }

    fn poll_sample(&mut self) -> Result<Option<u16>, Self::Error> {
        (**self).poll_sample()
    }
}

/// Wait up to `timeout_us` for the next sample, polling every `poll_us`.
///
/// Returns `Ok(None)` if nothing arrived in time.
pub fn wait_for_sample<S, D>(
    source: &mut S,
    delay: &mut D,
    timeout_us: u32,
    poll_us: u32,
) -> Result<Option<u16>, S::Error>
where
    S: SampleSource + ?Sized,
    D: DelayNs + ?Sized,
{
    let poll_us = poll_us.max(1);
    let mut waited_us: u32 = 0;

    loop {
        if let Some(raw) = source.poll_sample()? {
            return Ok(Some(raw));
        }
        if waited_us >= timeout_us {
            return Ok(None);
        }
        delay.delay_us(poll_us);
        waited_us = waited_us.saturating_add(poll_us);
    }
}
