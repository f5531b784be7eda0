//! Wheel configuration
//!
//! Persisted separately from the item roster in LocalStorage. Out-of-range
//! values are corrected through the `effective_*` accessors rather than
//! rejected, so a hand-edited or stale stored config still spins.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EASE_EXPONENT, DEFAULT_SETTLE_DELAY_MS, DEFAULT_SPIN_DURATION_MS, MIN_EXTRA_TURNS,
};

/// Spin behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Percent chance [0, 100] that a spin lands in the prize pool; `None`
    /// disables the bias stage. Only meaningful when the wheel mixes prize
    /// and blank items.
    pub win_bias: Option<f64>,
    /// Weighted selection and slice layout; uniform when false
    pub weighted_mode: bool,
    /// Animation duration in milliseconds
    pub spin_duration_ms: f64,
    /// Full turns added before the target; values below the floor are raised
    pub extra_turns: u32,
    /// Ease-out exponent (3 = cubic)
    pub ease_exponent: f64,
    /// Pause between animation end and the result report
    pub settle_delay_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            win_bias: None,
            weighted_mode: true,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            extra_turns: MIN_EXTRA_TURNS,
            ease_exponent: DEFAULT_EASE_EXPONENT,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl WheelConfig {
    /// Bias clamped to [0, 100]; non-finite values disable the stage
    pub fn effective_win_bias(&self) -> Option<f64> {
        self.win_bias
            .filter(|b| b.is_finite())
            .map(|b| b.clamp(0.0, 100.0))
    }

    /// Duration floored at 1 ms; non-finite values fall back to the default
    pub fn effective_spin_duration_ms(&self) -> f64 {
        if self.spin_duration_ms.is_finite() {
            self.spin_duration_ms.max(1.0)
        } else {
            DEFAULT_SPIN_DURATION_MS
        }
    }

    /// Extra turns with the minimum applied
    pub fn effective_extra_turns(&self) -> u32 {
        self.extra_turns.max(MIN_EXTRA_TURNS)
    }

    /// Exponent floored at 1 (linear); non-finite values fall back to cubic
    pub fn effective_ease_exponent(&self) -> f64 {
        if self.ease_exponent.is_finite() {
            self.ease_exponent.max(1.0)
        } else {
            DEFAULT_EASE_EXPONENT
        }
    }

    /// Settle delay floored at zero; non-finite values fall back to the
    /// default
    pub fn effective_settle_delay_ms(&self) -> f64 {
        if self.settle_delay_ms.is_finite() {
            self.settle_delay_ms.max(0.0)
        } else {
            DEFAULT_SETTLE_DELAY_MS
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prize_wheel_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded wheel config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default wheel config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Wheel config saved");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WheelConfig::default();
        assert_eq!(config.win_bias, None);
        assert!(config.weighted_mode);
        assert_eq!(config.spin_duration_ms, 5000.0);
        assert_eq!(config.extra_turns, 5);
        assert_eq!(config.ease_exponent, 3.0);
        assert_eq!(config.settle_delay_ms, 500.0);
    }

    #[test]
    fn test_effective_win_bias_clamps() {
        let mut config = WheelConfig::default();
        assert_eq!(config.effective_win_bias(), None);

        config.win_bias = Some(150.0);
        assert_eq!(config.effective_win_bias(), Some(100.0));
        config.win_bias = Some(-5.0);
        assert_eq!(config.effective_win_bias(), Some(0.0));
        config.win_bias = Some(f64::NAN);
        assert_eq!(config.effective_win_bias(), None);
    }

    #[test]
    fn test_effective_duration_and_delay_floors() {
        let config = WheelConfig {
            spin_duration_ms: -100.0,
            settle_delay_ms: -1.0,
            ..WheelConfig::default()
        };
        assert_eq!(config.effective_spin_duration_ms(), 1.0);
        assert_eq!(config.effective_settle_delay_ms(), 0.0);

        let broken = WheelConfig {
            spin_duration_ms: f64::INFINITY,
            ..WheelConfig::default()
        };
        assert_eq!(broken.effective_spin_duration_ms(), DEFAULT_SPIN_DURATION_MS);
    }

    #[test]
    fn test_effective_extra_turns_floor() {
        let config = WheelConfig {
            extra_turns: 2,
            ..WheelConfig::default()
        };
        assert_eq!(config.effective_extra_turns(), MIN_EXTRA_TURNS);

        let config = WheelConfig {
            extra_turns: 9,
            ..WheelConfig::default()
        };
        assert_eq!(config.effective_extra_turns(), 9);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: WheelConfig = serde_json::from_str(r#"{"weighted_mode":false}"#).unwrap();
        assert!(!config.weighted_mode);
        assert_eq!(config.spin_duration_ms, DEFAULT_SPIN_DURATION_MS);
        assert_eq!(config.win_bias, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = WheelConfig {
            win_bias: Some(60.0),
            weighted_mode: false,
            spin_duration_ms: 3000.0,
            extra_turns: 7,
            ease_exponent: 4.0,
            settle_delay_ms: 250.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: WheelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
