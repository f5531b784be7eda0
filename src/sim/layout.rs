//! Slice layout and target-angle geometry
//!
//! Angle convention: wheel angles are measured from 3 o'clock, increasing
//! clockwise, so slice 0 starts at angle zero and slices follow in item
//! order. The pointer is fixed at 12 o'clock (`POINTER_ANGLE`). A rotation
//! value `R` means the pointer has swept `R` radians across the wheel face
//! and sits over wheel angle `(POINTER_ANGLE + R) mod 2π`. A renderer that
//! draws slices clockwise gets the usual clockwise visual spin by applying
//! `rotate(-R)`.

use std::f64::consts::TAU;

use glam::Vec2;
use serde::Serialize;

use super::items::{self, Item};
use crate::consts::POINTER_ANGLE;
use crate::{normalize_angle, polar_to_cartesian};

/// Angular extent of one slice, in wheel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub index: usize,
    /// Start angle, [0, 2π)
    pub start: f64,
    /// Angular width, positive
    pub span: f64,
}

impl Slice {
    /// Center angle of the slice
    pub fn mid(&self) -> f64 {
        self.start + self.span / 2.0
    }
}

/// Compute the slice table for an item set.
///
/// Weighted layout sizes each slice proportionally to its weight; uniform
/// layout divides the wheel evenly. Item order is angular order. Items must
/// be validated.
pub fn slices(items: &[Item], weighted: bool) -> Vec<Slice> {
    let total = items::total_weight(items);
    let mut start = 0.0;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let span = if weighted {
                TAU * item.weight / total
            } else {
                TAU / items.len() as f64
            };
            let slice = Slice { index, start, span };
            start += span;
            slice
        })
        .collect()
}

/// Index of the slice under the pointer at rotation `rotation`.
/// Items must be non-empty and validated.
pub fn slice_at(items: &[Item], weighted: bool, rotation: f64) -> usize {
    let pointer = normalize_angle(POINTER_ANGLE + rotation);
    let table = slices(items, weighted);
    for slice in &table {
        if pointer < slice.start + slice.span {
            return slice.index;
        }
    }
    // Spans can sum a hair under 2π; the overshoot belongs to the last slice
    table.len() - 1
}

/// Rotation residue (mod 2π) that parks the pointer on the center of slice
/// `index`
pub fn target_residue(items: &[Item], weighted: bool, index: usize) -> f64 {
    let table = slices(items, weighted);
    normalize_angle(table[index].mid() - POINTER_ANGLE)
}

/// Smallest rotation at least `extra_turns` full turns past `current` that is
/// congruent to `residue` (mod 2π). Never goes backward.
pub fn forward_target(current: f64, residue: f64, extra_turns: u32) -> f64 {
    let min = current + extra_turns as f64 * TAU;
    min + (residue - min).rem_euclid(TAU)
}

/// Per-slice render geometry for the embedding layer
#[derive(Debug, Clone, Serialize)]
pub struct SliceGeometry {
    pub index: usize,
    pub label: String,
    pub start: f64,
    pub span: f64,
    /// Label anchor in wheel-local pixels (y-down screen convention)
    pub anchor: Vec2,
}

/// Geometry table for drawing: slice extents plus a label anchor placed at
/// `label_radius` along each slice's center line.
pub fn slice_geometry(items: &[Item], weighted: bool, label_radius: f32) -> Vec<SliceGeometry> {
    slices(items, weighted)
        .iter()
        .map(|slice| SliceGeometry {
            index: slice.index,
            label: items[slice.index].label.clone(),
            start: slice.start,
            span: slice.span,
            anchor: polar_to_cartesian(label_radius, slice.mid() as f32),
        })
        .collect()
}
