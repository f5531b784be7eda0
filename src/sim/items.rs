//! Wheel items and validation
//!
//! An item's angular position is its index: index 0 starts at angle zero and
//! items follow clockwise in collection order.

use serde::{Deserialize, Serialize};

use crate::error::WheelError;

/// A single wheel entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display label, reported back on a win
    pub label: String,
    /// Relative likelihood; any positive finite value, need not sum to 100
    pub weight: f64,
    /// No-prize segment ("try again"); the losing pool for win-bias draws
    #[serde(default)]
    pub blank: bool,
}

impl Item {
    /// A prize-awarding item
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
            blank: false,
        }
    }

    /// A no-prize filler segment
    pub fn blank(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
            blank: true,
        }
    }
}

/// Sum of all item weights
pub fn total_weight(items: &[Item]) -> f64 {
    items.iter().map(|i| i.weight).sum()
}

/// Check that an item set can be spun: non-empty, every weight positive and
/// finite, and the summed total finite. Runs on every spin request.
pub fn validate_items(items: &[Item]) -> Result<(), WheelError> {
    if items.is_empty() {
        return Err(WheelError::EmptyWheel);
    }
    for item in items {
        if !(item.weight > 0.0 && item.weight.is_finite()) {
            return Err(WheelError::InvalidWeight {
                label: item.label.clone(),
                weight: item.weight,
            });
        }
    }
    // Individually valid weights can still sum past f64::MAX
    let total = total_weight(items);
    if !total.is_finite() {
        return Err(WheelError::WeightOverflow { total });
    }
    Ok(())
}
