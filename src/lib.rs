//! Prize Wheel - weighted spinner widget core
//!
//! Core modules:
//! - `sim`: Deterministic wheel core (selection, layout, spin animation)
//! - `settings`: Spin configuration with LocalStorage persistence
//! - `roster`: Editable item list with LocalStorage persistence
//! - `widget`: Browser bridge around the core (wasm32 only)

pub mod error;
pub mod roster;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod widget;

pub use error::WheelError;
pub use roster::Roster;
pub use settings::WheelConfig;

use glam::Vec2;

/// Wheel behavior constants
pub mod consts {
    /// Pointer position: 12 o'clock in the 3-o'clock-origin, clockwise frame
    pub const POINTER_ANGLE: f64 = -std::f64::consts::FRAC_PI_2;
    /// Fewest full turns a spin travels before reaching its target
    pub const MIN_EXTRA_TURNS: u32 = 5;
    /// Default animation length
    pub const DEFAULT_SPIN_DURATION_MS: f64 = 5000.0;
    /// Default pause between animation end and the result report
    pub const DEFAULT_SETTLE_DELAY_MS: f64 = 500.0;
    /// Default ease-out exponent (cubic)
    pub const DEFAULT_EASE_EXPONENT: f64 = 3.0;
    /// Roster capacity
    pub const MAX_ITEMS: usize = 32;
    /// Frame delta clamp; a stalled tab cannot fast-forward the animation
    pub const MAX_FRAME_DT_MS: f64 = 100.0;
    /// Delta assumed for a frame with no predecessor (one 60 Hz frame)
    pub const FALLBACK_FRAME_DT_MS: f64 = 1000.0 / 60.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
