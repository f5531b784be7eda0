//! Wheel state, spin phases, and the outbound event stream

use serde::{Deserialize, Serialize};

use super::items::Item;
use crate::settings::WheelConfig;

/// Current phase of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// No spin in flight; requests accepted
    #[default]
    Idle,
    /// Animation running toward the target rotation
    Spinning,
    /// Animation done; waiting out the settle delay before reporting
    Settling,
}

impl SpinPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning => "spinning",
            SpinPhase::Settling => "settling",
        }
    }
}

/// Outcome of one completed spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub winning_index: usize,
    pub winning_item: Item,
}

impl SpinResult {
    /// False when the wheel stopped on a blank segment
    pub fn is_prize(&self) -> bool {
        !self.winning_item.blank
    }
}

/// Outbound notifications, drained by the embedding layer once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// New rotation value for redraw (radians, cumulative)
    Rotation(f64),
    /// Phase transition
    PhaseChanged(SpinPhase),
    /// Result of the spin that just settled; fires once per spin
    SpinCompleted(SpinResult),
}

/// Animation parameters latched when a spin starts. Config edits during the
/// spin do not touch these.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSpin {
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: f64,
    pub ease_exponent: f64,
    pub settle_delay_ms: f64,
    pub elapsed_ms: f64,
    pub settle_elapsed_ms: f64,
    pub result: SpinResult,
}

/// Complete state of one wheel instance.
///
/// Owns the item set, configuration, accumulated rotation, and the event
/// queue. No globals; any number of wheels can coexist in a process.
#[derive(Debug, Clone)]
pub struct WheelState {
    pub(crate) items: Vec<Item>,
    pub(crate) config: WheelConfig,
    pub(crate) phase: SpinPhase,
    /// Cumulative rotation in radians; grows across spins, only an explicit
    /// reset zeroes it
    pub(crate) rotation: f64,
    pub(crate) spin: Option<ActiveSpin>,
    pub(crate) events: Vec<WheelEvent>,
}

impl WheelState {
    pub fn new(items: Vec<Item>, config: WheelConfig) -> Self {
        Self {
            items,
            config,
            phase: SpinPhase::Idle,
            rotation: 0.0,
            spin: None,
            events: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// True from spin request until the result has been reported
    pub fn is_spinning(&self) -> bool {
        self.phase != SpinPhase::Idle
    }

    /// Target rotation of the in-flight spin, if any
    pub fn target_rotation(&self) -> Option<f64> {
        self.spin.as_ref().map(|s| s.target_rotation)
    }

    /// Replace the item set. Valid only while idle; busy calls are ignored
    /// and return false.
    pub fn update_items(&mut self, items: Vec<Item>) -> bool {
        if self.is_spinning() {
            log::warn!("item update ignored while {}", self.phase.as_str());
            return false;
        }
        self.items = items;
        true
    }

    /// Replace the configuration. Takes effect from the next spin; an
    /// in-flight spin keeps its latched parameters.
    pub fn set_config(&mut self, config: WheelConfig) {
        self.config = config;
    }

    /// Hard abort: drop any in-flight spin and queued events, zero the
    /// rotation, return to idle. No rotation frame is ever delivered after a
    /// reset.
    pub fn request_reset(&mut self) {
        let was_active = self.is_spinning();
        self.spin = None;
        self.rotation = 0.0;
        self.phase = SpinPhase::Idle;
        self.events.clear();
        if was_active {
            log::info!("spin aborted by reset");
            self.events.push(WheelEvent::PhaseChanged(SpinPhase::Idle));
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the oldest pending event. Consuming one at a time means a
    /// handler that resets the wheel mid-stream also cancels everything
    /// still queued behind it.
    pub fn next_event(&mut self) -> Option<WheelEvent> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events.remove(0))
        }
    }
}
