//! Backend registry
//!
//! Maps composite tool-name prefixes to the backend servers behind the gateway.

use crate::access_control::qualify;
use crate::config::BackendConfig;
use crate::config::loader::validate_backends;
use crate::error::ConfigError;
use std::collections::{BTreeSet, HashMap};

/// A backend server and the tools it serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    /// Server identifier, matched against `allowed_servers`
    pub id: String,
    /// Prefix of the composite names of this backend's tools
    pub name: String,
    /// Local tool names, sorted
    tools: BTreeSet<String>,
}

impl Backend {
    fn from_config(config: &BackendConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            tools: config.tools.iter().cloned().collect(),
        }
    }

    /// Check whether this backend serves a tool by local name
    pub fn has_tool(&self, local: &str) -> bool {
        self.tools.contains(local)
    }

    /// Composite names of this backend's tools, sorted
    pub fn qualified_tools(&self) -> impl Iterator<Item = String> + '_ {
        self.tools.iter().map(|tool| qualify(&self.name, tool))
    }
}

/// Backend registry
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    /// Backends in configuration order
    backends: Vec<Backend>,
    /// Index into `backends` by name
    by_name: HashMap<String, usize>,
}

impl BackendRegistry {
    /// Create a registry from backend configuration
    pub fn new(configs: &[BackendConfig]) -> Result<Self, ConfigError> {
        validate_backends(configs)?;

        let backends: Vec<Backend> = configs.iter().map(Backend::from_config).collect();
        let by_name = backends
            .iter()
            .enumerate()
            .map(|(index, backend)| (backend.name.clone(), index))
            .collect();

        Ok(Self { backends, by_name })
    }

    /// Look up a backend by its tool-name prefix
    pub fn get(&self, name: &str) -> Option<&Backend> {
        self.by_name.get(name).map(|&index| &self.backends[index])
    }

    /// Iterate over backends in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &Backend> {
        self.backends.iter()
    }

    /// Get the number of registered backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
