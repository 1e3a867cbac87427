// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage configuration, loadable from TOML.

use std::path::Path;

use canopy_mesh::Color;
use canopy_responder::TouchSettings;
use canopy_tween::EaseType;
use serde::{Deserialize, Serialize};

/// Where popups open relative to their target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupDirection {
    /// Below the target, or above it when there is no room below.
    #[default]
    Auto,
    /// Above the target.
    Up,
    /// Below the target.
    Down,
}

/// Tunables of a [`Stage`](crate::Stage).
///
/// Every field has a default, so a configuration file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pointer movement from the press position that cancels a click.
    pub click_cancel_distance: f64,
    /// Mouse movement before a draggable node starts dragging.
    pub click_drag_sensitivity: f64,
    /// Touch movement before a draggable node starts dragging.
    pub touch_drag_sensitivity: f64,
    /// Longest gap between presses of a double click, in seconds.
    pub double_click_interval: f64,
    /// Largest distance between presses of a double click.
    pub double_click_distance: f64,
    /// RGBA color of the layer shown beneath modal windows.
    pub modal_layer_color: [u8; 4],
    /// Ease used by the stage's tween helpers.
    pub default_ease: EaseType,
    /// Default placement of popups opened for a target.
    pub popup_direction: PopupDirection,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            click_cancel_distance: 50.0,
            click_drag_sensitivity: 2.0,
            touch_drag_sensitivity: 10.0,
            double_click_interval: 0.35,
            double_click_distance: 8.0,
            modal_layer_color: [51, 51, 51, 102],
            default_ease: EaseType::QuadOut,
            popup_direction: PopupDirection::Auto,
        }
    }
}

impl UiConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().is_none_or(|ext| ext != "toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Modal layer color.
    pub fn modal_color(&self) -> Color {
        Color::from_array(self.modal_layer_color)
    }

    /// Thresholds for the touch tracker.
    pub fn touch_settings(&self) -> TouchSettings {
        TouchSettings {
            click_cancel_distance: self.click_cancel_distance,
            double_click_interval: self.double_click_interval,
            double_click_distance: self.double_click_distance,
        }
    }
}

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let cfg = UiConfig::from_toml_str(
            r#"
            click_cancel_distance = 30.0
            default_ease = "Linear"
            popup_direction = "Up"
            "#,
        )
        .expect("valid config");
        assert_eq!(cfg.click_cancel_distance, 30.0, "overridden");
        assert_eq!(cfg.default_ease, EaseType::Linear, "ease by name");
        assert_eq!(cfg.popup_direction, PopupDirection::Up, "direction by name");
        assert_eq!(cfg.touch_drag_sensitivity, 10.0, "untouched default");
        assert_eq!(cfg.modal_color(), Color::rgba(51, 51, 51, 102), "default modal color");
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = UiConfig {
            double_click_interval: 0.5,
            ..UiConfig::default()
        };
        let text = cfg.to_toml_string().expect("serializable");
        assert_eq!(UiConfig::from_toml_str(&text).expect("parses"), cfg, "same config back");
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(
            matches!(
                UiConfig::from_toml_str("click_cancel_distance = \"far\""),
                Err(ConfigError::Parse(_))
            ),
            "type mismatch is a parse error"
        );
        assert!(
            matches!(UiConfig::load("ui.ron"), Err(ConfigError::UnsupportedFormat(_))),
            "only toml files"
        );
        assert!(
            matches!(
                UiConfig::load("/nonexistent/canopy/ui.toml"),
                Err(ConfigError::Io(_))
            ),
            "missing file is an io error"
        );
    }

    #[test]
    fn touch_settings_follow_config() {
        let cfg = UiConfig {
            click_cancel_distance: 12.0,
            ..UiConfig::default()
        };
        assert_eq!(cfg.touch_settings().click_cancel_distance, 12.0, "threshold forwarded");
    }
}
