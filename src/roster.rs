//! Editable item roster
//!
//! The item list the embedding UI edits between spins. Persisted to
//! LocalStorage separately from the config.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ITEMS;
use crate::error::WheelError;
use crate::sim::items::{self, Item};

/// The wheel's item list with editing rules applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub items: Vec<Item>,
}

impl Default for Roster {
    /// Four even prizes, the classic starter wheel
    fn default() -> Self {
        Self {
            items: (1..=4)
                .map(|n| Item::new(format!("Prize {}", n), 25.0))
                .collect(),
        }
    }
}

impl Roster {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prize_wheel_items";

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Add an item, validating label, weight, and capacity
    pub fn add_item(&mut self, item: Item) -> Result<(), WheelError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(WheelError::RosterFull { max: MAX_ITEMS });
        }
        if item.label.trim().is_empty() {
            return Err(WheelError::EmptyLabel);
        }
        if !(item.weight > 0.0 && item.weight.is_finite()) {
            return Err(WheelError::InvalidWeight {
                label: item.label.clone(),
                weight: item.weight,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove by index; None if out of range
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        items::total_weight(&self.items)
    }

    /// True when a spin request over these items would be accepted
    pub fn can_spin(&self) -> bool {
        items::validate_items(&self.items).is_ok()
    }

    /// Load the roster from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(roster) = serde_json::from_str::<Roster>(&json) {
                    log::info!("Loaded {} items from LocalStorage", roster.items.len());
                    return roster;
                }
            }
        }

        log::info!("No stored items, using starter roster");
        Self::default()
    }

    /// Save the roster to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Roster saved ({} items)", self.items.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
