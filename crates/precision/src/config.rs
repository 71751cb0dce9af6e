//! Codec configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::compare::{is_close, DEFAULT_TOLERANCE};
use crate::error::{PrecisionError, Result};

/// Environment variable selecting the half precision rounding policy
pub const ENV_HALF_ROUNDING: &str = "FLEXPREC_HALF_ROUNDING";

/// Environment variable overriding the comparison tolerance
pub const ENV_TOLERANCE: &str = "FLEXPREC_TOLERANCE";

/// How mantissa bits dropped by a narrowing conversion are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Round to nearest, ties to even
    #[default]
    NearestEven,
    /// Drop the bits (round toward zero)
    Truncate,
}

impl FromStr for Rounding {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest-even" | "nearest_even" | "rne" => Ok(Rounding::NearestEven),
            "truncate" | "toward-zero" | "rtz" => Ok(Rounding::Truncate),
            _ => Err(PrecisionError::UnknownRounding(s.to_string())),
        }
    }
}

/// Codec settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Rounding policy for float32 -> half precision
    #[serde(default)]
    pub half_rounding: Rounding,

    /// Tolerance used by [`CodecConfig::is_close`]
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            half_rounding: Rounding::default(),
            tolerance: default_tolerance(),
        }
    }
}

impl CodecConfig {
    /// Load config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from a key lookup, keeping defaults for missing or
    /// unparsable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HALF_ROUNDING) {
            match value.parse() {
                Ok(rounding) => config.half_rounding = rounding,
                Err(e) => tracing::warn!(key = ENV_HALF_ROUNDING, %value, "Ignoring: {}", e),
            }
        }

        if let Some(value) = lookup(ENV_TOLERANCE) {
            match value.trim().parse::<f32>() {
                Ok(t) if t.is_finite() && t >= 0.0 => config.tolerance = t,
                _ => tracing::warn!(key = ENV_TOLERANCE, %value, "Ignoring invalid tolerance"),
            }
        }

        tracing::debug!(
            half_rounding = ?config.half_rounding,
            tolerance = config.tolerance,
            "Codec config loaded"
        );

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PrecisionError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// [`is_close`] with the configured tolerance
    pub fn is_close(&self, a: f32, b: f32) -> bool {
        is_close(a, b, self.tolerance)
    }
}
