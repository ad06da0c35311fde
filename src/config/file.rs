//! Configuration sources: TOML files and environment variables

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use super::parser::{self, DEFAULT_CONFIG_FILE};
use super::settings::PartialCaptureSettings;
use super::ConfigSource;

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 10,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 10,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialCaptureSettings> {
        if !self.is_available() {
            return Err(ConfigError::NotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable configuration source.
///
/// Reads `{PREFIX}_CAPTURE` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`)
/// and `{PREFIX}_MAX_DEPTH`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
    lookup: Lookup,
}

impl EnvConfig {
    /// Create a new source reading the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Create a source reading from a fixed set of variables
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::with_lookup(prefix, move |name| vars.get(name).cloned())
    }

    fn with_lookup<F>(prefix: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 20,
            lookup: Box::new(lookup),
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    fn var(&self, suffix: &str) -> Option<(String, String)> {
        let name = format!("{}_{}", self.prefix, suffix);
        (self.lookup)(&name).map(|value| (name, value))
    }
}

fn parse_flag(name: String, value: String) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { name, value }),
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialCaptureSettings> {
        let mut settings = PartialCaptureSettings::default();

        if let Some((name, value)) = self.var("CAPTURE") {
            settings.enabled = Some(parse_flag(name, value)?);
        }

        if let Some((name, value)) = self.var("MAX_DEPTH") {
            let depth = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { name, value })?;
            settings.max_depth = Some(depth);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        self.var("CAPTURE").is_some() || self.var("MAX_DEPTH").is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_reads_prefixed_vars() {
        let env = EnvConfig::from_vars(
            "ERRTRAIL",
            [("ERRTRAIL_CAPTURE", "off"), ("ERRTRAIL_MAX_DEPTH", " 12 ")],
        );
        assert!(env.is_available());

        let settings = env.load().unwrap();
        assert_eq!(settings.enabled, Some(false));
        assert_eq!(settings.max_depth, Some(12));
    }

    #[test]
    fn test_env_config_ignores_other_prefixes() {
        let env = EnvConfig::from_vars("ERRTRAIL", [("OTHER_CAPTURE", "on")]);
        assert!(!env.is_available());
        assert_eq!(env.load().unwrap(), PartialCaptureSettings::default());
    }

    #[test]
    fn test_env_config_rejects_garbage() {
        let env = EnvConfig::from_vars("ERRTRAIL", [("ERRTRAIL_CAPTURE", "maybe")]);
        match env.load().unwrap_err() {
            ConfigError::InvalidEnv { name, value } => {
                assert_eq!(name, "ERRTRAIL_CAPTURE");
                assert_eq!(value, "maybe");
            }
            other => panic!("expected InvalidEnv, got {other:?}"),
        }

        let env = EnvConfig::from_vars("ERRTRAIL", [("ERRTRAIL_MAX_DEPTH", "-3")]);
        assert!(matches!(env.load(), Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_file_config_missing() {
        let file = FileConfig::with_path("/definitely/not/here.toml");
        assert!(!file.is_available());
        assert!(matches!(file.load(), Err(ConfigError::NotFound { .. })));
        assert_eq!(file.name(), "config file (/definitely/not/here.toml)");
    }
}
