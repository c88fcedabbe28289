//! Render settings and preferences
//!
//! Stored as a JSON file next to the scene description.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Rgb;
use crate::renderer::vertex::colors;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangles per full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }

    /// Triangles per rounded corner (quarter circle)
    pub fn corner_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 3,
            QualityPreset::Medium => 8,
            QualityPreset::High => 16,
        }
    }
}

/// Visualizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,

    // === Viewport ===
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub background: Rgb,

    // === Camera ===
    /// Keep the first ball centered on screen
    pub camera_follow: bool,
    /// Fraction of the distance to the target covered each frame
    pub camera_smoothing: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            viewport_width: 1000,
            viewport_height: 1000,
            background: colors::BACKGROUND,

            camera_follow: false,
            camera_smoothing: 0.1,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width as f32, self.viewport_height as f32)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {e}", path.display()),
            },
            Err(e) => log::info!("No settings at {} ({e})", path.display()),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to encode settings")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_presets_scale_tessellation() {
        assert!(QualityPreset::Low.circle_segments() < QualityPreset::High.circle_segments());
        assert!(QualityPreset::Low.corner_segments() < QualityPreset::High.corner_segments());
        assert_eq!(Settings::from_preset(QualityPreset::High).quality, QualityPreset::High);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "quality": "Low", "camera_follow": true }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.camera_follow);
        assert_eq!(settings.viewport_width, 1000);
        assert_eq!(settings.background, colors::BACKGROUND);
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert_eq!(Settings::load("/nonexistent/settings.json"), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "music_visualizer_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            camera_follow: true,
            viewport_width: 640,
            ..Settings::from_preset(QualityPreset::Low)
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
