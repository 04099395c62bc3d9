//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AirmenuError, AirmenuResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Kiosk display settings.
    pub display: DisplayConfig,

    /// Gesture signal processing parameters.
    pub gesture: GestureConfig,

    /// Dwell and screen-transition timing.
    pub interaction: InteractionConfig,

    /// Receipt and tax settings.
    pub billing: BillingConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Display parameters. The frame source delivers images at this resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,

    /// Target frame rate of the interaction loop.
    pub fps: u32,

    /// Draw the frames-per-second counter.
    pub show_fps: bool,

    /// Draw the fingertip cursor.
    pub show_cursor: bool,

    /// Draw the "Hand Detected" / "No Hand" indicator.
    pub show_hand_status: bool,
}

/// Gesture signal processing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// EMA factor in (0, 1]. Higher values follow the raw fingertip more
    /// closely (less smoothing).
    pub smoothing_factor: f64,

    /// Deadband radius in pixels. Movement below this in both axes is held.
    pub jitter_threshold_px: f64,

    /// Normalized thumb-tip to index-tip distance below which the hand is
    /// considered pinching.
    pub pinch_threshold: f64,

    /// Minimum spacing between accepted pinch interactions (seconds).
    pub interaction_cooldown_secs: f64,
}

/// Dwell and transition timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Continuous hover time required to auto-select (seconds).
    pub dwell_secs: f64,

    /// Screen-change animation length (seconds).
    pub transition_secs: f64,
}

/// Billing parameters handed to the receipt generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// GST as a fraction (0.18 = 18%).
    pub gst_rate: f64,
    pub restaurant_name: String,
    pub currency_symbol: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "airmenu=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            show_fps: true,
            show_cursor: true,
            show_hand_status: true,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.7,
            jitter_threshold_px: 5.0,
            pinch_threshold: 0.05,
            interaction_cooldown_secs: 0.3,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 0.8,
            transition_secs: 0.5,
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            gst_rate: 0.18,
            restaurant_name: "AirMenu Restaurant".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location. A missing file yields the
    /// defaults; an unreadable or invalid one is an error.
    pub fn load() -> AirmenuResult<Self> {
        Self::load_at(&config_file_path())
    }

    /// Like [`AppConfig::load`], for an explicit path.
    pub fn load_at(path: &Path) -> AirmenuResult<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> AirmenuResult<Self> {
        if !path.exists() {
            return Err(AirmenuError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> AirmenuResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AirmenuResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject parameter combinations the interaction core cannot run with.
    pub fn validate(&self) -> AirmenuResult<()> {
        let g = &self.gesture;
        if !(g.smoothing_factor > 0.0 && g.smoothing_factor <= 1.0) {
            return Err(AirmenuError::config(format!(
                "gesture.smoothing_factor must be in (0, 1], got {}",
                g.smoothing_factor
            )));
        }
        if g.jitter_threshold_px < 0.0 {
            return Err(AirmenuError::config(
                "gesture.jitter_threshold_px must not be negative",
            ));
        }
        if g.pinch_threshold <= 0.0 {
            return Err(AirmenuError::config(
                "gesture.pinch_threshold must be positive",
            ));
        }
        if g.interaction_cooldown_secs < 0.0 {
            return Err(AirmenuError::config(
                "gesture.interaction_cooldown_secs must not be negative",
            ));
        }

        let i = &self.interaction;
        if i.dwell_secs <= 0.0 || i.transition_secs <= 0.0 {
            return Err(AirmenuError::config(
                "interaction durations must be positive",
            ));
        }

        let d = &self.display;
        if d.width == 0 || d.height == 0 || d.fps == 0 {
            return Err(AirmenuError::config(
                "display width, height and fps must be non-zero",
            ));
        }

        if !(0.0..=1.0).contains(&self.billing.gst_rate) {
            return Err(AirmenuError::config(format!(
                "billing.gst_rate must be in [0, 1], got {}",
                self.billing.gst_rate
            )));
        }

        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("airmenu").join("config.json")
}
