//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use super::settings::{PartialCaptureSettings, SettingsValidator};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".errtrail.toml";

/// Parse a TOML configuration file into PartialCaptureSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialCaptureSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialCaptureSettings
pub fn parse_config_content<P: AsRef<Path>>(
    content: &str,
    path: P,
) -> Result<PartialCaptureSettings> {
    let path = path.as_ref();

    let settings: PartialCaptureSettings =
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Some(depth) = settings.max_depth {
        SettingsValidator::validate_max_depth(depth).map_err(|_| {
            ConfigError::invalid(format!(
                "Invalid max_depth {depth} in config file: {}",
                path.display()
            ))
        })?;
    }

    Ok(settings)
}

/// Candidate locations for the default configuration file, in lookup order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("errtrail").join("config.toml"));
    }
    paths
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialCaptureSettings>> {
    for path in default_config_paths() {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading capture settings");
            return parse_config_file(path).map(Some);
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("errtrail.toml");
        fs::write(&config_path, "enabled = false\nmax_depth = 8\n").unwrap();

        let settings = parse_config_file(&config_path).unwrap();
        assert_eq!(settings.enabled, Some(false));
        assert_eq!(settings.max_depth, Some(8));
    }

    #[test]
    fn test_parse_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = parse_config_file(temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = parse_config_content("max_depth = [", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = parse_config_content("scan_path = \".\"", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_zero_depth() {
        let err = parse_config_content("max_depth = 0", "zero.toml").unwrap_err();
        match err {
            ConfigError::Invalid { message } => assert!(message.contains("zero.toml")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_default_paths_start_with_working_dir() {
        let paths = default_config_paths();
        assert_eq!(paths[0], PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
