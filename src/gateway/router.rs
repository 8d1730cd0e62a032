//! Tool call routing
//!
//! Turns a composite tool name into a backend call target and enforces the
//! caller's access policy before anything is forwarded.

use crate::access_control::{AccessResolver, QualifiedToolName};
use crate::error::RouteError;
use crate::gateway::registry::BackendRegistry;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Where an authorized call goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Backend server id
    pub server_id: String,
    /// Backend prefix
    pub backend: String,
    /// Tool name as the backend knows it
    pub tool: String,
    /// Composite name as the caller sent it
    pub qualified_name: String,
}

/// A tool visible to a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolListing {
    pub name: String,
    pub server_id: String,
    pub backend: String,
}

/// Routes tool calls to backends, enforcing access control
#[derive(Debug, Clone)]
pub struct ToolRouter {
    registry: BackendRegistry,
    access: Arc<AccessResolver>,
}

impl ToolRouter {
    pub fn new(registry: BackendRegistry, access: Arc<AccessResolver>) -> Self {
        Self { registry, access }
    }

    /// Resolve and authorize a call.
    ///
    /// A denied call is an error; the caller must not forward it.
    #[instrument(skip(self))]
    pub fn route(&self, caller: Option<&str>, qualified_name: &str) -> Result<Route, RouteError> {
        let parsed = QualifiedToolName::parse(qualified_name)
            .ok_or_else(|| RouteError::MalformedName(qualified_name.to_string()))?;

        let backend = self
            .registry
            .get(parsed.server)
            .ok_or_else(|| RouteError::UnknownBackend(parsed.server.to_string()))?;

        if !backend.has_tool(parsed.tool) {
            return Err(RouteError::UnknownTool {
                backend: backend.name.clone(),
                tool: parsed.tool.to_string(),
            });
        }

        self.access
            .require(caller, &backend.id, qualified_name)
            .inspect_err(|e| info!(reason = %e.reason, "Denied tool call"))?;

        debug!(server = %backend.id, "Routed tool call");

        Ok(Route {
            server_id: backend.id.clone(),
            backend: backend.name.clone(),
            tool: parsed.tool.to_string(),
            qualified_name: qualified_name.to_string(),
        })
    }

    /// Tools the caller may invoke, in backend then tool order
    pub fn list_tools(&self, caller: Option<&str>) -> Vec<ToolListing> {
        self.registry
            .iter()
            .flat_map(|backend| {
                backend.qualified_tools().filter_map(move |name| {
                    self.access
                        .is_permitted(caller, &backend.id, &name)
                        .then(|| ToolListing {
                            name,
                            server_id: backend.id.clone(),
                            backend: backend.name.clone(),
                        })
                })
            })
            .collect()
    }
}
