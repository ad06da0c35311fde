//! Capture settings and their validation

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};
use crate::stack::DEFAULT_MAX_DEPTH;

/// Upper bound accepted for `max_depth`
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Settings controlling stack capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Whether constructors capture a stack at all
    pub enabled: bool,

    /// Maximum number of frames kept per snapshot
    pub max_depth: usize,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Capture settings where every field is optional, as read from one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialCaptureSettings {
    pub enabled: Option<bool>,
    pub max_depth: Option<usize>,
}

impl PartialCaptureSettings {
    /// Merge another PartialCaptureSettings into this one; fields set in
    /// `other` win.
    pub fn merge_from(&mut self, other: PartialCaptureSettings) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
    }

    /// Fill unset fields from the defaults
    pub fn to_settings(&self) -> CaptureSettings {
        let defaults = CaptureSettings::default();
        CaptureSettings {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
        }
    }
}

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &CaptureSettings) -> Result<()> {
        Self::validate_max_depth(settings.max_depth)
    }

    /// Validate a max depth value wherever it came from
    pub fn validate_max_depth(depth: usize) -> Result<()> {
        if depth == 0 {
            return Err(ConfigError::invalid("max_depth must be at least 1"));
        }
        if depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::invalid(format!(
                "max_depth {depth} exceeds the limit of {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }
}
