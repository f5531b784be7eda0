//! Easing curves for the spin animation

/// Ease-out power curve: fast start, decelerating to a stop.
///
/// `1 - (1 - t)^p` with `t` clamped to [0, 1]. An exponent of 3 gives the
/// classic cubic ease-out; higher exponents brake harder at the end.
#[inline]
pub fn ease_out(t: f64, exponent: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powf(exponent)
}

/// Linear interpolation from `start` to `end` by factor `t`
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}
