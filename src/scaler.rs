use num_traits::AsPrimitive;

/// Map `value` from `[min, max]` onto `[0, out_max]` by integer linear
/// interpolation.
///
/// Returns the midpoint code while the range is empty or inverted. Values
/// outside the range clamp to the ends.
pub fn scale<T>(value: T, min: T, max: T, out_max: u16) -> u16
where
    T: Copy + PartialOrd + AsPrimitive<i64>,
{
    if max <= min {
        return out_max / 2;
    }

    let value = value.as_();
    let min = min.as_();
    let max = max.as_();

    // Widened so (value - min) * out_max cannot overflow for 32-bit inputs
    let scaled = (value - min) * i64::from(out_max) / (max - min);
    num_traits::clamp(scaled, 0, i64::from(out_max)) as u16
}
