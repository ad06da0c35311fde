//! Capture configuration
//!
//! Stack capture is controlled by process-wide [`CaptureSettings`]. They are
//! installed at most once, typically at startup from [`load_default`]; until
//! then the defaults apply.

pub mod error;
pub mod file;
pub mod parser;
pub mod settings;

use once_cell::sync::OnceCell;

pub use error::{ConfigError, Result};
pub use file::{EnvConfig, FileConfig};
pub use parser::{find_default_config, parse_config_content, parse_config_file};
pub use settings::{CaptureSettings, PartialCaptureSettings, SettingsValidator};

/// Prefix of the environment variables read by [`load_default`]
pub const ENV_PREFIX: &str = "ERRTRAIL";

static SETTINGS: OnceCell<CaptureSettings> = OnceCell::new();

static DEFAULT_SETTINGS: CaptureSettings = CaptureSettings {
    enabled: true,
    max_depth: crate::stack::DEFAULT_MAX_DEPTH,
};

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialCaptureSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialCaptureSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialCaptureSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialCaptureSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }
        tracing::debug!(source = source.name(), "merging capture settings");
        Ok(self.merge(source.load()?))
    }

    /// Try to load from a source, ignoring it if unavailable or broken
    pub fn try_load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Self {
        if !source.is_available() {
            return self;
        }
        match source.load() {
            Ok(partial) => {
                tracing::debug!(source = source.name(), "merging capture settings");
                self.merge(partial)
            }
            Err(err) => {
                tracing::warn!(source = source.name(), error = %err, "ignoring configuration source");
                self
            }
        }
    }

    /// Load several sources, lowest priority first so higher ones win
    pub fn load_all(mut self, sources: &mut [&dyn ConfigSource]) -> Result<Self> {
        sources.sort_by_key(|source| source.priority());
        for source in sources.iter() {
            self = self.load_from(*source)?;
        }
        Ok(self)
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<CaptureSettings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load settings from the first default config file found and the
/// `ERRTRAIL_*` environment variables, the latter taking precedence.
pub fn load_default() -> Result<CaptureSettings> {
    let mut builder = ConfigBuilder::new();
    if let Some(partial) = find_default_config()? {
        builder = builder.merge(partial);
    }
    builder.load_from(&EnvConfig::new(ENV_PREFIX))?.build()
}

/// Install the process-wide settings.
///
/// Settings are validated first; invalid ones are rejected and nothing is
/// installed. Returns `Ok(false)` if settings were already installed; the
/// first installed value stays in effect.
pub fn install(settings: CaptureSettings) -> Result<bool> {
    SettingsValidator::validate(&settings)?;
    let installed = SETTINGS.set(settings).is_ok();
    if installed {
        tracing::debug!(
            enabled = settings.enabled,
            max_depth = settings.max_depth,
            "installed capture settings"
        );
    }
    Ok(installed)
}

/// The installed settings, or the defaults if none were installed
pub fn current() -> CaptureSettings {
    *SETTINGS.get().unwrap_or(&DEFAULT_SETTINGS)
}
