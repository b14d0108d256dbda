/// Wrap into `[0, 1)`. Never returns exactly 1.0, which float rounding of `x - floor(x)` can.
#[inline]
pub fn wrap01(x: f32) -> f32 {
    let w = x - x.floor();
    if w >= 1.0 { 0.0 } else { w }
}
