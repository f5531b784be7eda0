//! Deterministic wheel core
//!
//! Selection, layout, and animation logic lives here. This module must be
//! pure and deterministic:
//! - Injected frame time only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod easing;
pub mod items;
pub mod layout;
pub mod select;
pub mod state;
pub mod tick;

pub use items::{Item, total_weight, validate_items};
pub use layout::{
    Slice, SliceGeometry, forward_target, slice_at, slice_geometry, slices, target_residue,
};
pub use select::select_winner;
pub use state::{SpinPhase, SpinResult, WheelEvent, WheelState};
pub use tick::{advance, request_spin};
