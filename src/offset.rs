/// Subtract the baseline offset from a raw sample, clamping at zero.
#[inline]
pub fn correct(raw: u16, offset: u16) -> u16 {
    let corrected = i32::from(raw) - i32::from(offset);
    if corrected < 0 { 0 } else { corrected as u16 }
}
