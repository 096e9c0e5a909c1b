//! Presentation settings and preferences
//!
//! These never affect the simulation; presenters read them when turning a
//! frame into feedback.

use serde::{Deserialize, Serialize};

use crate::consts::SWIPE_SENSITIVITY_MOBILE;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum points drawn per particle burst
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 20,
            QualityPreset::Medium => 50,
            QualityPreset::High => 80,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quality preset (caps drawn burst points)
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Camera shake on penalties
    pub screen_shake: bool,
    /// Victory particle bursts
    pub particles: bool,

    // === Input ===
    /// Pointer is a touch screen (drags move the player further)
    pub touch_input: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            touch_input: false,
            reduced_motion: false,
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

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Shake intensity after preferences are applied
    pub fn shake_intensity(&self, raw: f32) -> f32 {
        if self.effective_screen_shake() { raw } else { 0.0 }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Multiplier applied to pointer drags
    pub fn drag_sensitivity(&self) -> f32 {
        if self.touch_input {
            SWIPE_SENSITIVITY_MOBILE
        } else {
            1.0
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
