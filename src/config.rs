//! Viewer configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use crate::consts::{
    DEFAULT_FOV_DEG, DEFAULT_FRAME_MARGIN, DEFAULT_FRAME_RATE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_ORBIT_DISTANCE, DEFAULT_ROTATE_RAD_PER_PX, DEFAULT_ZOOM_SENSITIVITY,
};
use crate::error::ErrorCode;
use crate::orbit::OrbitSettings;
use crate::viewport::{ControlSettings, ZoomLimits};

pub const VARIANT_VAR: &str = "SITEPLAN_VARIANT";
pub const MIN_ZOOM_VAR: &str = "SITEPLAN_MIN_ZOOM";
pub const MAX_ZOOM_VAR: &str = "SITEPLAN_MAX_ZOOM";
pub const ZOOM_SENSITIVITY_VAR: &str = "SITEPLAN_ZOOM_SENSITIVITY";
pub const ROTATE_RAD_PER_PX_VAR: &str = "SITEPLAN_ROTATE_RAD_PER_PX";
pub const FOV_DEG_VAR: &str = "SITEPLAN_FOV_DEG";
pub const ORBIT_DISTANCE_VAR: &str = "SITEPLAN_ORBIT_DISTANCE";
pub const FRAME_MARGIN_VAR: &str = "SITEPLAN_FRAME_MARGIN";
pub const FRAME_RATE_VAR: &str = "SITEPLAN_FRAME_RATE";

/// Every variable [`ViewerConfig::from_env`] reads.
pub const ALL_VARS: [&str; 9] = [
    VARIANT_VAR,
    MIN_ZOOM_VAR,
    MAX_ZOOM_VAR,
    ZOOM_SENSITIVITY_VAR,
    ROTATE_RAD_PER_PX_VAR,
    FOV_DEG_VAR,
    ORBIT_DISTANCE_VAR,
    FRAME_MARGIN_VAR,
    FRAME_RATE_VAR,
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: &'static str, value: String },
    #[error("{var} must be {expected}, got {value}")]
    OutOfRange { var: &'static str, value: f64, expected: &'static str },
    #[error("unknown SITEPLAN_VARIANT: {0:?} (expected 'flat' or 'orbit')")]
    UnknownVariant(String),
    #[error("SITEPLAN_MIN_ZOOM ({min}) is larger than SITEPLAN_MAX_ZOOM ({max})")]
    ZoomRange { min: f64, max: f64 },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E_CONFIG_PARSE",
            Self::OutOfRange { .. } => "E_CONFIG_RANGE",
            Self::UnknownVariant(_) => "E_CONFIG_VARIANT",
            Self::ZoomRange { .. } => "E_CONFIG_ZOOM_RANGE",
        }
    }
}

/// Which camera the viewer runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Pseudo-3D projection on a flat drawing plane.
    #[default]
    Flat,
    /// Perspective orbit camera over a ground plane.
    Orbit,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "2d" => Ok(Self::Flat),
            "orbit" | "3d" => Ok(Self::Orbit),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flat => "flat",
            Self::Orbit => "orbit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub variant: Variant,
    pub controls: ControlSettings,
    pub orbit: OrbitSettings,
    /// Room left around a model when auto-framing (1.0 = touching the edges).
    pub frame_margin: f64,
    pub frame_rate: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            controls: ControlSettings::default(),
            orbit: OrbitSettings::default(),
            frame_margin: DEFAULT_FRAME_MARGIN,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl ViewerConfig {
    /// Build typed viewer config from environment variables.
    ///
    /// All optional:
    /// - `SITEPLAN_VARIANT`: `flat` (default) or `orbit`
    /// - `SITEPLAN_MIN_ZOOM` / `SITEPLAN_MAX_ZOOM`: default 0.1 / 3.0
    /// - `SITEPLAN_ZOOM_SENSITIVITY`: default 0.001 per wheel unit
    /// - `SITEPLAN_ROTATE_RAD_PER_PX`: default 0.01
    /// - `SITEPLAN_FOV_DEG`: default 45
    /// - `SITEPLAN_ORBIT_DISTANCE`: default 400
    /// - `SITEPLAN_FRAME_MARGIN`: default 1.5
    /// - `SITEPLAN_FRAME_RATE`: default 60
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any value that is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Same as [`ViewerConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any value that is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match lookup(VARIANT_VAR) {
            Some(raw) => raw.parse()?,
            None => Variant::default(),
        };

        let zoom = ZoomLimits::new(
            parse_f64(&lookup, MIN_ZOOM_VAR, DEFAULT_MIN_ZOOM)?,
            parse_f64(&lookup, MAX_ZOOM_VAR, DEFAULT_MAX_ZOOM)?,
            parse_f64(&lookup, ZOOM_SENSITIVITY_VAR, DEFAULT_ZOOM_SENSITIVITY)?,
        )?;
        let controls = ControlSettings {
            zoom,
            rotate_rad_per_px: positive(&lookup, ROTATE_RAD_PER_PX_VAR, DEFAULT_ROTATE_RAD_PER_PX)?,
        };

        let fov_deg = parse_f64(&lookup, FOV_DEG_VAR, DEFAULT_FOV_DEG)?;
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(ConfigError::OutOfRange { var: FOV_DEG_VAR, value: fov_deg, expected: "between 0 and 180" });
        }
        let orbit = OrbitSettings { fov_deg, base_distance: positive(&lookup, ORBIT_DISTANCE_VAR, DEFAULT_ORBIT_DISTANCE)? };

        let frame_margin = parse_f64(&lookup, FRAME_MARGIN_VAR, DEFAULT_FRAME_MARGIN)?;
        if frame_margin < 1.0 {
            return Err(ConfigError::OutOfRange { var: FRAME_MARGIN_VAR, value: frame_margin, expected: "at least 1.0" });
        }

        let frame_rate = match lookup(FRAME_RATE_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(rate) if rate > 0 => rate,
                _ => return Err(ConfigError::Parse { var: FRAME_RATE_VAR, value: raw }),
            },
            None => DEFAULT_FRAME_RATE,
        };

        Ok(Self { variant, controls, orbit, frame_margin, frame_rate })
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::Parse { var, value: raw }),
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_f64(lookup, var, default)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange { var, value, expected: "positive" });
    }
    Ok(value)
}
