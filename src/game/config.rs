// game/config.rs

use bevy::color::Srgba;
use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

use crate::geometry::PlacementConfig;

const CONFIG_JSON: &str = include_str!("../../assets/evasion.json");

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    ZeroAttemptLimit,
    NonPositive(&'static str),
    Negative(&'static str),
    InvalidRange(&'static str),
    InvalidColor(String),
    EmptyPalette,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Could not parse config: {}", msg),
            ConfigError::ZeroAttemptLimit => write!(f, "attempt_limit must be at least 1"),
            ConfigError::NonPositive(field) => write!(f, "{} must be positive", field),
            ConfigError::Negative(field) => write!(f, "{} must not be negative", field),
            ConfigError::InvalidRange(field) => write!(f, "{} has min greater than max", field),
            ConfigError::InvalidColor(hex) => write!(f, "Invalid confetti color {:?}", hex),
            ConfigError::EmptyPalette => write!(f, "Confetti palette is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Play-area sizing (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub max_width: f32,
    pub height: f32,
    /// Kept free on each side when the window is narrower than `max_width`
    pub side_margin: f32,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            max_width: 560.0,
            height: 260.0,
            side_margin: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub count: usize,
    pub colors: Vec<String>,
    pub min_size: f32,
    pub max_size: f32,
    pub max_delay_secs: f32,
    pub min_duration_secs: f32,
    pub max_duration_secs: f32,
    /// Extra lifetime after the fall before a piece is removed
    pub cleanup_grace_secs: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 40,
            colors: ["#ff4d7e", "#ff90b3", "#ffd3e0", "#ffd36b", "#ff6f91"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_size: 6.0,
            max_size: 14.0,
            max_delay_secs: 0.8,
            min_duration_secs: 1.4,
            max_duration_secs: 2.6,
            cleanup_grace_secs: 0.3,
        }
    }
}

impl ConfettiConfig {
    /// Parse the hex palette
    pub fn palette(&self) -> Result<Vec<Color>, ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        self.colors
            .iter()
            .map(|hex| {
                Srgba::hex(hex)
                    .map(Color::from)
                    .map_err(|_| ConfigError::InvalidColor(hex.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub question: String,
    pub target_label: String,
    pub evader_label: String,
    pub settled_tooltip: String,
    pub celebration_title: String,
    pub celebration_subtext: String,
    pub decline_subtext: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            question: "Will you be my Valentine?".into(),
            target_label: "Yes".into(),
            evader_label: "No".into(),
            settled_tooltip: "Okay, you can click me now".into(),
            celebration_title: "yessss ayayyyy".into(),
            celebration_subtext: "You made my day - I'm so happy".into(),
            decline_subtext: "Oh no... maybe next time".into(),
        }
    }
}

/// All tunables, embedded from assets/evasion.json
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Evasions before the evader settles down
    pub attempt_limit: u32,
    /// Pointer distance from the target center that scares the evader
    pub proximity_radius: f32,
    /// Layout settle time before the evader is first positioned
    pub initial_placement_delay_secs: f32,
    pub placement: PlacementConfig,
    pub area: AreaConfig,
    pub button_size: [f32; 2],
    pub confetti: ConfettiConfig,
    pub texts: Texts,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            attempt_limit: 10,
            proximity_radius: 120.0,
            initial_placement_delay_secs: 0.1,
            placement: PlacementConfig::default(),
            area: AreaConfig::default(),
            button_size: [112.0, 48.0],
            confetti: ConfettiConfig::default(),
            texts: Texts::default(),
        }
    }
}

impl EvasionConfig {
    /// Load the embedded configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(CONFIG_JSON)
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EvasionConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded config, or the defaults if it is unusable
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                warn!("⚠️ {} - using default configuration", err);
                Self::default()
            }
        }
    }

    pub fn button_size(&self) -> Vec2 {
        Vec2::from(self.button_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempt_limit == 0 {
            return Err(ConfigError::ZeroAttemptLimit);
        }

        let placement = &self.placement;
        let positive = [
            ("placement.reach_large", placement.reach_large),
            ("placement.reach_small", placement.reach_small),
            ("placement.angle_step", placement.angle_step),
            ("proximity_radius", self.proximity_radius),
            ("area.max_width", self.area.max_width),
            ("area.height", self.area.height),
            ("button_size[0]", self.button_size[0]),
            ("button_size[1]", self.button_size[1]),
            ("confetti.min_size", self.confetti.min_size),
            ("confetti.min_duration_secs", self.confetti.min_duration_secs),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(field));
            }
        }

        let non_negative = [
            ("placement.padding", placement.padding),
            ("placement.degenerate_threshold", placement.degenerate_threshold),
            ("placement.min_dist_large", placement.min_dist_large),
            ("placement.min_dist_small", placement.min_dist_small),
            ("placement.small_breakpoint", placement.small_breakpoint),
            ("area.side_margin", self.area.side_margin),
            ("initial_placement_delay_secs", self.initial_placement_delay_secs),
            ("confetti.max_delay_secs", self.confetti.max_delay_secs),
            ("confetti.cleanup_grace_secs", self.confetti.cleanup_grace_secs),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative(field));
            }
        }

        if self.confetti.min_size > self.confetti.max_size {
            return Err(ConfigError::InvalidRange("confetti size"));
        }
        if self.confetti.min_duration_secs > self.confetti.max_duration_secs {
            return Err(ConfigError::InvalidRange("confetti duration"));
        }

        self.confetti.palette()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = EvasionConfig::load().unwrap();
        assert_eq!(config.attempt_limit, 10);
        assert_eq!(config.placement.rotation_attempts, 8);
        assert_eq!(config.confetti.count, 40);
        assert_eq!(config.button_size(), Vec2::new(112.0, 48.0));
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = EvasionConfig::load().unwrap();
        let defaults = EvasionConfig::default();

        assert_eq!(config.attempt_limit, defaults.attempt_limit);
        assert_eq!(config.proximity_radius, defaults.proximity_radius);
        assert_eq!(config.area, defaults.area);
        assert_eq!(config.texts, defaults.texts);
        assert!((config.placement.angle_step - defaults.placement.angle_step).abs() < 1e-6);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = EvasionConfig::from_json(r#"{ "attempt_limit": 3 }"#).unwrap();
        assert_eq!(config.attempt_limit, 3);
        assert_eq!(config.placement, PlacementConfig::default());
        assert_eq!(config.texts.evader_label, "No");
    }

    #[test]
    fn test_zero_attempt_limit_rejected() {
        let err = EvasionConfig::from_json(r#"{ "attempt_limit": 0 }"#).unwrap_err();
        assert_eq!(err, ConfigError::ZeroAttemptLimit);
    }

    #[test]
    fn test_non_positive_reach_rejected() {
        let err = EvasionConfig::from_json(r#"{ "placement": { "reach_small": 0.0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::NonPositive("placement.reach_small"));
    }

    #[test]
    fn test_negative_grace_rejected() {
        let err = EvasionConfig::from_json(r#"{ "confetti": { "cleanup_grace_secs": -0.5 } }"#)
            .unwrap_err();
        assert_eq!(err, ConfigError::Negative("confetti.cleanup_grace_secs"));
    }

    #[test]
    fn test_negative_placement_values_rejected() {
        let err = EvasionConfig::from_json(r#"{ "placement": { "padding": -1.0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::Negative("placement.padding"));

        let err = EvasionConfig::from_json(r#"{ "placement": { "min_dist_small": -0.1 } }"#)
            .unwrap_err();
        assert_eq!(err, ConfigError::Negative("placement.min_dist_small"));
    }

    #[test]
    fn test_zero_padding_and_grace_allowed() {
        let config = EvasionConfig::from_json(
            r#"{ "placement": { "padding": 0.0 }, "confetti": { "cleanup_grace_secs": 0.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.placement.padding, 0.0);
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = EvasionConfig::from_json(r##"{ "confetti": { "colors": ["#ff4d7e", "pink"] } }"##)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidColor("pink".into()));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = EvasionConfig::from_json(r#"{ "confetti": { "colors": [] } }"#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPalette);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EvasionConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_palette_parses() {
        let palette = ConfettiConfig::default().palette().unwrap();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette[0], Color::from(Srgba::rgb_u8(0xff, 0x4d, 0x7e)));
    }
}
