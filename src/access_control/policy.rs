//! Compiled access policies
//!
//! A policy is selected once from the two allow-lists and then answers
//! membership questions. Tool restrictions replace server restrictions
//! entirely; they are never combined.

use std::collections::HashSet;
use std::fmt;

/// Allow-list entry granting every tool on every server
pub const WILDCARD: &str = "*";

/// Which tools a tool-restricted policy grants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolScope {
    /// The wildcard was configured
    AllTools,
    /// Exact composite tool names
    Specific(HashSet<String>),
}

impl ToolScope {
    /// Build a scope from allow-list entries.
    ///
    /// Returns `None` when there are no entries, meaning no tool-level
    /// restriction. A wildcard anywhere in the list wins over the other entries.
    pub fn from_entries<I, S>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: HashSet<String> = entries
            .into_iter()
            .map(|entry| entry.as_ref().to_string())
            .collect();

        if names.is_empty() {
            None
        } else if names.contains(WILDCARD) {
            Some(ToolScope::AllTools)
        } else {
            Some(ToolScope::Specific(names))
        }
    }

    /// Check whether a composite tool name is in scope
    pub fn contains(&self, tool_name: &str) -> bool {
        match self {
            ToolScope::AllTools => true,
            ToolScope::Specific(names) => names.contains(tool_name),
        }
    }
}

/// Access policy for one caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Neither list configured: every call is allowed
    #[default]
    Unrestricted,
    /// Tool list configured: only the tool list is consulted
    ToolRestricted(ToolScope),
    /// Only the server list configured
    ServerRestricted(HashSet<String>),
}

/// Result of an access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed
    Allowed,
    /// Access is denied with a reason
    Denied(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }
}

impl AccessPolicy {
    /// Select the policy for a pair of allow-lists.
    ///
    /// Empty and absent lists mean the same thing: no restriction of that kind.
    pub fn from_lists<S, T>(allowed_servers: &[S], allowed_tools: &[T]) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if let Some(scope) = ToolScope::from_entries(allowed_tools) {
            return AccessPolicy::ToolRestricted(scope);
        }

        let servers: HashSet<String> = allowed_servers
            .iter()
            .map(|server| server.as_ref().to_string())
            .collect();

        if servers.is_empty() {
            AccessPolicy::Unrestricted
        } else {
            AccessPolicy::ServerRestricted(servers)
        }
    }

    /// Check whether a call to `tool_name` on `server_id` is permitted
    pub fn permits(&self, server_id: &str, tool_name: &str) -> bool {
        match self {
            AccessPolicy::Unrestricted => true,
            AccessPolicy::ToolRestricted(scope) => scope.contains(tool_name),
            AccessPolicy::ServerRestricted(servers) => servers.contains(server_id),
        }
    }

    /// Like [`permits`](Self::permits), but explains a denial
    pub fn check(&self, server_id: &str, tool_name: &str) -> AccessDecision {
        match self {
            AccessPolicy::Unrestricted => AccessDecision::Allowed,
            AccessPolicy::ToolRestricted(scope) if scope.contains(tool_name) => {
                AccessDecision::Allowed
            }
            AccessPolicy::ToolRestricted(_) => AccessDecision::Denied(format!(
                "Tool '{}' is not in the allowed tools list",
                tool_name
            )),
            AccessPolicy::ServerRestricted(servers) if servers.contains(server_id) => {
                AccessDecision::Allowed
            }
            AccessPolicy::ServerRestricted(_) => AccessDecision::Denied(format!(
                "Server '{}' is not in the allowed servers list",
                server_id
            )),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, AccessPolicy::Unrestricted)
    }

    /// Short label for logs
    pub fn describe(&self) -> &'static str {
        match self {
            AccessPolicy::Unrestricted => "unrestricted",
            AccessPolicy::ToolRestricted(ToolScope::AllTools) => "all tools",
            AccessPolicy::ToolRestricted(ToolScope::Specific(_)) => "tool allow-list",
            AccessPolicy::ServerRestricted(_) => "server allow-list",
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPolicy::Unrestricted => write!(f, "unrestricted"),
            AccessPolicy::ToolRestricted(ToolScope::AllTools) => write!(f, "tools: {}", WILDCARD),
            AccessPolicy::ToolRestricted(ToolScope::Specific(names)) => {
                write!(f, "tools: {}", sorted_join(names))
            }
            AccessPolicy::ServerRestricted(servers) => {
                write!(f, "servers: {}", sorted_join(servers))
            }
        }
    }
}

fn sorted_join(set: &HashSet<String>) -> String {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items.join(", ")
}
