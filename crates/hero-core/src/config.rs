//! Mount-time configuration for the hero.
//!
//! A [`RenderConfig`] is validated once when the hero is created. The shader
//! tunables inside it stay adjustable afterwards through the setters on
//! [`ShaderTunables`], which re-check the same invariants.

use crate::constants::*;
use crate::error::ConfigError;
use std::str::FromStr;

/// Accent color as normalized RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accent(pub [f32; 3]);

impl Accent {
    /// Parse `#rrggbb` (the leading `#` is optional, hex digits are case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidAccent(hex.to_string()));
        }
        let channel = |i: usize| -> Result<f32, ConfigError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ConfigError::InvalidAccent(hex.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Like [`Accent::from_hex`] but falls back to the default accent.
    pub fn from_hex_or_default(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|e| {
            log::warn!("[hero] {e}; using default accent");
            Self::default()
        })
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self(DEFAULT_ACCENT_RGB)
    }
}

/// Read-only capability hints, consulted once to pick the initial cap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceHints {
    pub memory_gb: Option<f32>,
    pub cores: Option<u32>,
}

impl DeviceHints {
    fn memory(&self) -> f32 {
        self.memory_gb.unwrap_or(HINT_DEFAULT_MEMORY_GB)
    }

    fn cores(&self) -> u32 {
        self.cores.unwrap_or(HINT_DEFAULT_CORES)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QualityPreset {
    Low,
    #[default]
    Auto,
    High,
}

impl QualityPreset {
    /// Pixel-ratio cap for this preset, starting from the configured `base` cap.
    pub fn resolve_cap(self, base: f32, hints: &DeviceHints) -> f32 {
        match self {
            QualityPreset::High => base.max(HIGH_QUALITY_CAP),
            QualityPreset::Low => base.min(LOW_QUALITY_CAP),
            QualityPreset::Auto => {
                let mut cap = base;
                if hints.memory() >= HINT_STRONG_MEMORY_GB && hints.cores() >= HINT_STRONG_CORES {
                    cap = cap.max(HIGH_QUALITY_CAP);
                }
                if hints.memory() <= HINT_DEFAULT_MEMORY_GB || hints.cores() <= HINT_DEFAULT_CORES {
                    cap = cap.min(LOW_QUALITY_CAP);
                }
                cap
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Auto => "auto",
            QualityPreset::High => "high",
        }
    }
}

impl FromStr for QualityPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "auto" => Ok(QualityPreset::Auto),
            "high" => Ok(QualityPreset::High),
            _ => Err(ConfigError::UnknownQuality(s.to_string())),
        }
    }
}

/// Inputs to the one-time reduced-motion decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionPolicy {
    pub prefers_reduced_motion: bool,
    pub force_motion: bool,
    pub query_override: bool,
}

impl MotionPolicy {
    pub fn allows_motion(&self) -> bool {
        self.force_motion || self.query_override || !self.prefers_reduced_motion
    }
}

/// `true` when the page query string carries `motion=on`.
pub fn motion_override_from_query(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(k, v)| k == "motion" && v == "on")
}

/// Scalars forwarded to the fragment shader every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderTunables {
    pub beam_strength: f32,
    pub lens_strength: f32,
    pub swirl_speed: f32,
    pub disk_inner: f32,
    pub disk_outer: f32,
    pub sensitivity: f32,
}

impl Default for ShaderTunables {
    fn default() -> Self {
        Self {
            beam_strength: DEFAULT_BEAM_STRENGTH,
            lens_strength: DEFAULT_LENS_STRENGTH,
            swirl_speed: DEFAULT_SWIRL_SPEED,
            disk_inner: DEFAULT_DISK_INNER,
            disk_outer: DEFAULT_DISK_OUTER,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

fn finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

impl ShaderTunables {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("beam_strength", self.beam_strength)?;
        finite("lens_strength", self.lens_strength)?;
        finite("swirl_speed", self.swirl_speed)?;
        finite("disk_inner", self.disk_inner)?;
        finite("disk_outer", self.disk_outer)?;
        if self.disk_inner >= self.disk_outer {
            return Err(ConfigError::DiskRadiiOrder {
                inner: self.disk_inner,
                outer: self.disk_outer,
            });
        }
        if !(self.sensitivity > 0.0 && self.sensitivity <= 1.0) {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }

    pub fn set_beam_strength(&mut self, v: f32) -> Result<(), ConfigError> {
        self.beam_strength = finite("beam_strength", v)?;
        Ok(())
    }

    pub fn set_lens_strength(&mut self, v: f32) -> Result<(), ConfigError> {
        self.lens_strength = finite("lens_strength", v)?;
        Ok(())
    }

    pub fn set_swirl_speed(&mut self, v: f32) -> Result<(), ConfigError> {
        self.swirl_speed = finite("swirl_speed", v)?;
        Ok(())
    }

    pub fn set_disk_inner(&mut self, v: f32) -> Result<(), ConfigError> {
        let v = finite("disk_inner", v)?;
        if v >= self.disk_outer {
            return Err(ConfigError::DiskRadiiOrder {
                inner: v,
                outer: self.disk_outer,
            });
        }
        self.disk_inner = v;
        Ok(())
    }

    pub fn set_disk_outer(&mut self, v: f32) -> Result<(), ConfigError> {
        let v = finite("disk_outer", v)?;
        if self.disk_inner >= v {
            return Err(ConfigError::DiskRadiiOrder {
                inner: self.disk_inner,
                outer: v,
            });
        }
        self.disk_outer = v;
        Ok(())
    }

    pub fn set_sensitivity(&mut self, v: f32) -> Result<(), ConfigError> {
        if !(v > 0.0 && v <= 1.0) {
            return Err(ConfigError::InvalidSensitivity(v));
        }
        self.sensitivity = v;
        Ok(())
    }
}

/// Immutable-after-mount configuration of one hero instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub selector: String,
    pub accent: Accent,
    pub pixel_ratio_cap: f32,
    pub height_fraction: f32,
    pub force_motion: bool,
    /// `None` keeps `pixel_ratio_cap` as given.
    pub quality: Option<QualityPreset>,
    pub controls: bool,
    pub tunables: ShaderTunables,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            selector: "#bh-hero".to_string(),
            accent: Accent::default(),
            pixel_ratio_cap: DEFAULT_PIXEL_RATIO_CAP,
            height_fraction: DEFAULT_HEIGHT_FRACTION,
            force_motion: false,
            quality: Some(QualityPreset::Auto),
            controls: true,
            tunables: ShaderTunables::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixel_ratio_cap.is_finite() && self.pixel_ratio_cap > 0.0) {
            return Err(ConfigError::InvalidPixelRatioCap(self.pixel_ratio_cap));
        }
        if !(self.height_fraction > 0.0 && self.height_fraction <= 1.0) {
            return Err(ConfigError::InvalidHeightFraction(self.height_fraction));
        }
        self.tunables.validate()
    }

    /// CSS height applied to a container that has no inline height of its own.
    pub fn container_height_css(&self) -> String {
        let vh = (self.height_fraction * 100.0).round() as u32;
        format!("min({vh}vh, {MAX_HEIGHT_PX}px)")
    }

    pub fn container_min_height_css(&self) -> String {
        format!("{MIN_HEIGHT_PX}px")
    }
}
