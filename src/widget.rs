//! Browser widget bridge (wasm32 only)
//!
//! Exposes the wheel core to the embedding page. JS supplies items and
//! config as JSON, registers callbacks, and draws the wheel; this module
//! owns the requestAnimationFrame loop and forwards the core's event stream.
//! The loop runs only while a spin is in flight.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::consts::FALLBACK_FRAME_DT_MS;
use crate::roster::Roster;
use crate::settings::WheelConfig;
use crate::sim::items::Item;
use crate::sim::layout::slice_geometry;
use crate::sim::state::{SpinPhase, WheelEvent, WheelState};
use crate::sim::tick;

struct Inner {
    state: WheelState,
    rng: Pcg32,
    last_time: f64,
    raf_active: bool,
    on_rotation_frame: Option<js_sys::Function>,
    on_spin_complete: Option<js_sys::Function>,
    on_state_change: Option<js_sys::Function>,
}

/// One wheel instance bound to the page
#[wasm_bindgen]
pub struct WheelWidget {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl WheelWidget {
    /// Create a widget from the persisted roster and config (or defaults)
    #[wasm_bindgen(constructor)]
    pub fn new() -> WheelWidget {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let roster = Roster::load();
        let config = WheelConfig::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Wheel widget created with seed: {}", seed);

        WheelWidget {
            inner: Rc::new(RefCell::new(Inner {
                state: WheelState::new(roster.items, config),
                rng: Pcg32::seed_from_u64(seed),
                last_time: 0.0,
                raf_active: false,
                on_rotation_frame: None,
                on_spin_complete: None,
                on_state_change: None,
            })),
        }
    }

    /// Callback for every animated frame: `(rotation_radians: number) => void`
    pub fn set_on_rotation_frame(&self, callback: js_sys::Function) {
        self.inner.borrow_mut().on_rotation_frame = Some(callback);
    }

    /// Callback fired once per spin: `(result_json: string) => void`
    pub fn set_on_spin_complete(&self, callback: js_sys::Function) {
        self.inner.borrow_mut().on_spin_complete = Some(callback);
    }

    /// Callback for phase transitions: `(phase: string) => void`
    pub fn set_on_state_change(&self, callback: js_sys::Function) {
        self.inner.borrow_mut().on_state_change = Some(callback);
    }

    /// Start a spin. Returns false when the wheel is busy; invalid items
    /// raise.
    pub fn request_spin(&self) -> Result<bool, JsValue> {
        let started = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            tick::request_spin(&mut inner.state, &mut inner.rng)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        if started {
            dispatch_events(&self.inner);
            schedule_frame(&self.inner);
        }
        Ok(started)
    }

    /// Abort any spin, zero the rotation, return to idle
    pub fn request_reset(&self) {
        self.inner.borrow_mut().state.request_reset();
        dispatch_events(&self.inner);
    }

    /// Replace the item list from JSON (`[{label, weight, blank?}, ...]`).
    /// Ignored (returns false) while a spin is in flight; persisted when
    /// applied.
    pub fn update_items(&self, items_json: &str) -> Result<bool, JsValue> {
        let items: Vec<Item> =
            serde_json::from_str(items_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut inner = self.inner.borrow_mut();
        let applied = inner.state.update_items(items);
        if applied {
            Roster::from_items(inner.state.items().to_vec()).save();
        }
        Ok(applied)
    }

    /// Replace the configuration from JSON; missing fields keep defaults.
    /// The in-flight spin, if any, keeps its latched parameters.
    pub fn set_config(&self, config_json: &str) -> Result<(), JsValue> {
        let config: WheelConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        config.save();
        self.inner.borrow_mut().state.set_config(config);
        Ok(())
    }

    /// Current cumulative rotation in radians
    pub fn rotation(&self) -> f64 {
        self.inner.borrow().state.rotation()
    }

    /// Current phase: "idle", "spinning", or "settling"
    pub fn phase(&self) -> String {
        self.inner.borrow().state.phase().as_str().to_string()
    }

    pub fn is_spinning(&self) -> bool {
        self.inner.borrow().state.is_spinning()
    }

    /// True when a spin request right now would be accepted
    pub fn can_spin(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.state.is_spinning()
            && crate::sim::items::validate_items(inner.state.items()).is_ok()
    }

    /// Current items as JSON
    pub fn items_json(&self) -> String {
        serde_json::to_string(self.inner.borrow().state.items()).unwrap_or_else(|_| "[]".into())
    }

    /// Slice geometry for drawing, as JSON, with label anchors at
    /// `label_radius`
    pub fn layout_json(&self, label_radius: f32) -> String {
        let inner = self.inner.borrow();
        let table = slice_geometry(
            inner.state.items(),
            inner.state.config().weighted_mode,
            label_radius,
        );
        serde_json::to_string(&table).unwrap_or_else(|_| "[]".into())
    }
}

/// Forward queued events to the registered JS callbacks, one at a time.
/// Each event is taken under a fresh borrow and delivered with none held, so
/// callbacks may call back into the widget; a callback that resets the wheel
/// cancels the events still queued behind it.
fn dispatch_events(inner: &Rc<RefCell<Inner>>) {
    loop {
        let (event, callback) = {
            let mut b = inner.borrow_mut();
            let Some(event) = b.state.next_event() else {
                break;
            };
            let callback = match &event {
                WheelEvent::Rotation(_) => b.on_rotation_frame.clone(),
                WheelEvent::PhaseChanged(_) => b.on_state_change.clone(),
                WheelEvent::SpinCompleted(_) => b.on_spin_complete.clone(),
            };
            (event, callback)
        };

        match event {
            WheelEvent::Rotation(angle) => {
                if let Some(cb) = &callback {
                    let _ = cb.call1(&JsValue::NULL, &JsValue::from_f64(angle));
                }
            }
            WheelEvent::PhaseChanged(phase) => {
                if let Some(cb) = &callback {
                    let _ = cb.call1(&JsValue::NULL, &JsValue::from_str(phase.as_str()));
                }
            }
            WheelEvent::SpinCompleted(result) => {
                log::info!("Spin complete: '{}'", result.winning_item.label);
                if let Some(cb) = &callback {
                    if let Ok(json) = serde_json::to_string(&result) {
                        let _ = cb.call1(&JsValue::NULL, &JsValue::from_str(&json));
                    }
                }
            }
        }
    }
}

/// Kick the frame loop if it is not already running
fn schedule_frame(inner: &Rc<RefCell<Inner>>) {
    let start_loop = {
        let mut b = inner.borrow_mut();
        b.last_time = 0.0;
        if b.raf_active {
            false
        } else {
            b.raf_active = true;
            true
        }
    };
    if start_loop {
        request_animation_frame(inner.clone());
    }
}

fn request_animation_frame(inner: Rc<RefCell<Inner>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        frame(inner, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn frame(inner: Rc<RefCell<Inner>>, time: f64) {
    let keep_going = {
        let mut b = inner.borrow_mut();
        let dt = if b.last_time > 0.0 {
            time - b.last_time
        } else {
            FALLBACK_FRAME_DT_MS
        };
        b.last_time = time;
        tick::advance(&mut b.state, dt);

        let animating = b.state.phase() != SpinPhase::Idle;
        if !animating {
            b.raf_active = false;
        }
        animating
    };

    dispatch_events(&inner);

    if keep_going {
        request_animation_frame(inner);
    }
}
