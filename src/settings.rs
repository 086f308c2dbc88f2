//! Game tunables and player preferences
//!
//! Persisted as JSON in LocalStorage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::speed::Smoothing;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" => Some(Difficulty::Normal),
            "frantic" | "hard" => Some(Difficulty::Frantic),
            _ => None,
        }
    }

    /// Next preset, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Relaxed => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Frantic,
            Difficulty::Frantic => Difficulty::Relaxed,
        }
    }

    /// Speed limit increase per pellet (px/ms)
    pub fn speed_increment(&self) -> f64 {
        match self {
            Difficulty::Relaxed => SPEED_INCREMENT * 0.5,
            Difficulty::Normal => SPEED_INCREMENT,
            Difficulty::Frantic => SPEED_INCREMENT * 2.0,
        }
    }

    /// Speed limit ceiling (px/ms)
    pub fn max_speed(&self) -> f64 {
        match self {
            Difficulty::Relaxed => MAX_SPEED * 0.5,
            Difficulty::Normal => MAX_SPEED,
            Difficulty::Frantic => MAX_SPEED,
        }
    }
}

/// When the speed floor is enforced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Checked only when a pointer sample arrives; holding still never loses
    OnSample,
    /// Checked every frame. Once no pointer sample has arrived for
    /// `idle_grace_ms`, the head is re-sampled in place each frame so the
    /// measured speed decays.
    EveryFrame { idle_grace_ms: f64 },
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        SpeedPolicy::EveryFrame { idle_grace_ms: 0.0 }
    }
}

/// Invalid or unreadable settings
#[derive(Debug)]
pub enum SettingsError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A tunable is out of range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "could not parse settings: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Snake ===
    /// Body links at the start of a round
    pub initial_segments: usize,
    /// Length of every link (px)
    pub seg_length: f64,
    /// Body stroke width (px)
    pub body_width: f64,

    // === Pellet ===
    pub item_radius: f64,
    /// Clearance from walls and body when placing a pellet (px)
    pub placement_buffer: f64,
    pub max_placement_attempts: u32,

    // === Speed ===
    /// Speed limit increase per pellet (px/ms)
    pub speed_increment: f64,
    /// Speed limit ceiling (px/ms)
    pub max_speed: f64,
    pub smoothing: Smoothing,
    /// Trail steps averaged per raw speed measurement
    pub speed_window: usize,
    pub speed_policy: SpeedPolicy,

    // === Round flow ===
    pub countdown_secs: f64,
    /// Radius of the start circle (px)
    pub ready_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            initial_segments: INITIAL_SEGMENTS,
            seg_length: SEG_LENGTH,
            body_width: BODY_WIDTH,

            item_radius: ITEM_RADIUS,
            placement_buffer: PLACEMENT_BUFFER,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,
            smoothing: Smoothing::default(),
            speed_window: SPEED_WINDOW,
            speed_policy: SpeedPolicy::default(),

            countdown_secs: COUNTDOWN_SECS,
            ready_radius: READY_RADIUS,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset (updates the speed tunables)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.speed_increment = difficulty.speed_increment();
        self.max_speed = difficulty.max_speed();
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject tunables the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be zero or more",
                })
            }
        }

        if self.initial_segments < 1 {
            return Err(SettingsError::Invalid {
                field: "initial_segments",
                reason: "must be at least 1",
            });
        }
        positive("seg_length", self.seg_length)?;
        positive("body_width", self.body_width)?;
        positive("item_radius", self.item_radius)?;
        non_negative("placement_buffer", self.placement_buffer)?;
        if self.max_placement_attempts == 0 {
            return Err(SettingsError::Invalid {
                field: "max_placement_attempts",
                reason: "must be at least 1",
            });
        }
        non_negative("speed_increment", self.speed_increment)?;
        positive("max_speed", self.max_speed)?;
        match self.smoothing {
            Smoothing::Fixed { alpha } if !(0.0..=1.0).contains(&alpha) => {
                return Err(SettingsError::Invalid {
                    field: "smoothing",
                    reason: "alpha must be within [0, 1]",
                });
            }
            Smoothing::TimeConstant { tau_secs } => positive("smoothing", tau_secs)?,
            _ => {}
        }
        if self.speed_window == 0 {
            return Err(SettingsError::Invalid {
                field: "speed_window",
                reason: "must be at least 1",
            });
        }
        if let SpeedPolicy::EveryFrame { idle_grace_ms } = self.speed_policy {
            non_negative("speed_policy", idle_grace_ms)?;
        }
        non_negative("countdown_secs", self.countdown_secs)?;
        positive("ready_radius", self.ready_radius)?;
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "speed_snek_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
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
