//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (TOOLGATE__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::access_control::{TOOL_NAME_SEPARATOR, WILDCARD};
use crate::config::types::{AccessControlConfig, AppConfig, BackendConfig};
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashSet;
use std::env;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "toolgate.toml",
    ".toolgate.toml",
    "~/.config/toolgate/config.toml",
    "/etc/toolgate/config.toml",
];

/// Environment variable prefix
const ENV_PREFIX: &str = "TOOLGATE";

/// Keys whose environment values are comma-separated lists
const LIST_KEYS: &[&str] = &["access_control.allowed_servers", "access_control.allowed_tools"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
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
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g. TOOLGATE__LOGGING__LEVEL=debug
    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    // e.g. TOOLGATE__ACCESS_CONTROL__ALLOWED_SERVERS=1,2
    // Applied as overrides so entries stay strings: a lone `7` or `true`
    // would otherwise be parsed as a scalar instead of a one-element list.
    for key in LIST_KEYS {
        if let Ok(value) = env::var(env_var_name(key)) {
            builder = builder
                .set_override(*key, split_list(&value))
                .map_err(|e| ConfigError::Load(e.to_string()))?;
        }
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Environment variable for a dotted config key
fn env_var_name(key: &str) -> String {
    format!("{}__{}", ENV_PREFIX, key.replace('.', "__").to_uppercase())
}

/// Split a comma-separated environment value, keeping every entry verbatim
/// apart from surrounding whitespace. A blank value is an empty list.
fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|entry| entry.trim().to_string()).collect()
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_backends(&config.backends)?;

    if config.access_control.callers.contains_key("") {
        return Err(ConfigError::Invalid {
            message: "access_control.callers contains an empty caller name".to_string(),
        });
    }

    Ok(())
}

/// Validate that every backend has a unique id and a usable tool prefix
pub(crate) fn validate_backends(backends: &[BackendConfig]) -> Result<(), ConfigError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for (index, backend) in backends.iter().enumerate() {
        if backend.id.is_empty() {
            return Err(ConfigError::Missing {
                field: format!("backends[{}].id", index),
            });
        }
        if backend.name.is_empty() {
            return Err(ConfigError::Missing {
                field: format!("backends[{}].name", index),
            });
        }
        if backend.name.contains(TOOL_NAME_SEPARATOR) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "backend name '{}' must not contain '{}'",
                    backend.name, TOOL_NAME_SEPARATOR
                ),
            });
        }
        if !ids.insert(backend.id.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!("duplicate backend id '{}'", backend.id),
            });
        }
        if !names.insert(backend.name.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!("duplicate backend name '{}'", backend.name),
            });
        }
        // An empty local name would be advertised as "<name>__", which no
        // caller can route.
        if backend.tools.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid {
                message: format!("backend '{}' has an empty tool name", backend.name),
            });
        }
    }

    Ok(())
}

/// Find allow-list entries that are legal but almost certainly mistakes.
///
/// Entries are never rewritten: an empty string still counts as a restriction.
/// Returns one message per finding, for the caller to log.
pub fn lint_access_control(config: &AccessControlConfig) -> Vec<String> {
    let mut findings = Vec::new();
    lint_allow_list(&config.allowed_servers, "access_control.allowed_servers", &mut findings);
    lint_allow_list(&config.allowed_tools, "access_control.allowed_tools", &mut findings);

    let mut callers: Vec<_> = config.callers.iter().collect();
    callers.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (caller, caller_config) in callers {
        lint_allow_list(
            &caller_config.allowed_servers,
            &format!("access_control.callers.{}.allowed_servers", caller),
            &mut findings,
        );
        lint_allow_list(
            &caller_config.allowed_tools,
            &format!("access_control.callers.{}.allowed_tools", caller),
            &mut findings,
        );
    }

    findings
}

fn lint_allow_list(entries: &[String], field_path: &str, findings: &mut Vec<String>) {
    if entries.iter().any(String::is_empty) {
        findings.push(format!(
            "{} contains an empty entry, which matches nothing",
            field_path
        ));
    }
    if entries.len() > 1 && entries.iter().any(|e| e == WILDCARD) {
        findings.push(format!(
            "{} mixes '{}' with other entries; the other entries have no effect",
            field_path, WILDCARD
        ));
    }
}
