//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (TEAMCITY_HARNESS__*)
//! 2. Conventional variables (TEAMCITY_URL, TEAMCITY_SUPERUSER_TOKEN)
//! 3. Configuration file (TOML)
//! 4. Default values

use crate::config::types::HarnessConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "teamcity-harness.toml",
    ".teamcity-harness.toml",
    "~/.config/teamcity-harness/config.toml",
];

/// Unprefixed variables shared with other TeamCity tooling:
/// (variable, prefixed equivalent, config key)
const CONVENTIONAL_VARS: &[(&str, &str, &str)] = &[
    ("TEAMCITY_URL", "TEAMCITY_HARNESS__SERVER__URL", "server.url"),
    (
        "TEAMCITY_SUPERUSER_TOKEN",
        "TEAMCITY_HARNESS__SERVER__SUPERUSER_TOKEN",
        "server.superuser_token",
    ),
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<HarnessConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let harness_config: HarnessConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&harness_config)?;

    Ok(harness_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<HarnessConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // Overrides beat every source, so a conventional variable only applies
    // when its prefixed counterpart is absent
    for (conventional, prefixed, key) in CONVENTIONAL_VARS {
        if std::env::var_os(prefixed).is_some() {
            continue;
        }
        if let Ok(value) = std::env::var(conventional) {
            builder = builder
                .set_override(*key, value)
                .map_err(|e| ConfigError::Load(e.to_string()))?;
        }
    }

    // e.g., TEAMCITY_HARNESS__SERVER__URL, TEAMCITY_HARNESS__LOGGING__LEVEL
    // Values stay strings: all-digit tokens must not become numbers.
    // Numeric and boolean fields are converted during deserialization.
    builder = builder.add_source(
        Environment::with_prefix("TEAMCITY_HARNESS")
            .prefix_separator("__")
            .separator("__"),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let harness_config: HarnessConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&harness_config)?;

    Ok(harness_config)
}

/// Validate configuration values
///
/// The super user token stays optional here: only operations that need a
/// super user specification require it.
fn validate_config(config: &HarnessConfig) -> Result<(), ConfigError> {
    if config.server.url.is_empty() {
        return Err(ConfigError::Missing {
            field: "server.url".to_string(),
        });
    }

    if !config.server.url.starts_with("http://") && !config.server.url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            message: format!(
                "server.url must start with http:// or https://, got: {}",
                config.server.url
            ),
        });
    }

    if config.server.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            message: "server.timeout_secs must be greater than 0".to_string(),
        });
    }

    Ok(())
}
