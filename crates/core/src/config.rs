//! Framework settings.
//!
//! Settings live in a YAML file, `~/.clip/config.yml` by default. The path can
//! be overridden with the `CLIP_CONFIG` environment variable. A missing file
//! is not an error; every field has a default.

use std::fs::File;
use std::path::Path;

use leon::Template;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Error, Result};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.clip/config.yml";

/// Environment variable overriding the settings path
pub const SETTINGS_PATH_ENV: &str = "CLIP_CONFIG";

/// Keys a version format may reference.
const VERSION_KEYS: [&str; 2] = ["name", "version"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Script run when no script name is selected.
    pub default_script: String,
    /// Whether the first argument may select a script by name.
    pub multi_script: bool,
    /// Spaces between the longest option string and its description.
    pub help_gutter: usize,
    /// Template for the version banner, e.g. `{name} {version}`.
    pub version_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_script: "main".to_string(),
            multi_script: false,
            help_gutter: 8,
            version_format: "{name} {version}".to_string(),
        }
    }
}

impl Settings {
    /// Checks that the version format parses and only uses known keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::VersionFormat`] describing the problem.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let template = Template::parse(&self.version_format).map_err(|e| {
            ConfigurationError::VersionFormat {
                format: self.version_format.clone(),
                reason: e.to_string(),
            }
        })?;

        for key in template.keys() {
            if !VERSION_KEYS.contains(key) {
                return Err(ConfigurationError::VersionFormat {
                    format: self.version_format.clone(),
                    reason: format!("unknown key `{key}`"),
                });
            }
        }

        Ok(())
    }
}

/// Resolves the settings file path.
///
/// An explicit path wins, then `CLIP_CONFIG`, then the default path. Shell
/// expansions like `~` are resolved.
///
/// ```
/// use clip_core::config::get_settings_path;
///
/// let custom = get_settings_path(&Some("/etc/clip.yml".to_string()));
/// assert_eq!(custom, "/etc/clip.yml");
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    let from_env = std::env::var(SETTINGS_PATH_ENV).ok();
    let settings_path = match (settings_path_arg, &from_env) {
        (Some(path), _) | (None, Some(path)) => path.as_str(),
        (None, None) => DEFAULT_SETTINGS_PATH,
    };

    shellexpand::tilde(settings_path).to_string()
}

/// Reads settings from `settings_path`, falling back to defaults when the
/// file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
/// - The version format is invalid
pub fn load_settings(settings_path: &str) -> Result<Settings> {
    if !Path::exists(Path::new(settings_path)) {
        debug!("No settings file at `{settings_path}`, using defaults");
        return Ok(Settings::default());
    }

    let reader = File::open(settings_path)
        .map_err(|e| Error::io_error("settings".to_string(), settings_path.to_string(), e))?;

    // Deserializing straight into `Result<Settings>` confuses serde's error type.
    let settings: serde_yaml::Result<Settings> = serde_yaml::from_reader(reader);
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            return Err(Error::yaml_error(
                "reading".to_string(),
                "settings".to_string(),
                settings_path.to_string(),
                e,
            ))
        }
    };

    settings.validate()?;
    info!("Loaded settings from `{settings_path}`");
    Ok(settings)
}
