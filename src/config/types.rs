//! Configuration types for toolgate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use serde::Deserialize;
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Allow-lists for the default caller and named caller profiles
    pub access_control: AccessControlConfig,

    /// Backend servers reachable through the gateway
    pub backends: Vec<BackendConfig>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Access control configuration
///
/// Two positive allow-lists per caller:
/// - `allowed_tools` holds composite `<server>__<tool>` names or `"*"`
/// - `allowed_servers` holds backend server ids
///
/// A non-empty `allowed_tools` replaces `allowed_servers` entirely.
/// With both lists empty every call is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Servers the default caller may reach
    pub allowed_servers: Vec<String>,

    /// Tools the default caller may invoke
    pub allowed_tools: Vec<String>,

    /// Named caller profiles; unknown callers use the top-level lists
    pub callers: HashMap<String, CallerAccessConfig>,
}

/// Allow-lists for one named caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallerAccessConfig {
    pub allowed_servers: Vec<String>,
    pub allowed_tools: Vec<String>,
}

/// A backend server behind the gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Server identifier matched against `allowed_servers`
    pub id: String,

    /// Prefix of the composite tool names this backend exposes
    pub name: String,

    /// Local names of the tools this backend serves
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
