//! Composite tool names
//!
//! The gateway exposes each backend tool as `<server>__<tool>`. Only the
//! router splits these names; access checks compare them whole.

use std::fmt;

/// Separator between the server prefix and the tool's local name
pub const TOOL_NAME_SEPARATOR: &str = "__";

/// Build the composite name for a backend tool
pub fn qualify(prefix: &str, local: &str) -> String {
    format!("{}{}{}", prefix, TOOL_NAME_SEPARATOR, local)
}

/// A composite tool name split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedToolName<'a> {
    pub server: &'a str,
    pub tool: &'a str,
}

impl<'a> QualifiedToolName<'a> {
    /// Split at the first separator.
    ///
    /// Returns `None` if there is no separator or either side is empty.
    pub fn parse(name: &'a str) -> Option<Self> {
        let (server, tool) = name.split_once(TOOL_NAME_SEPARATOR)?;
        if server.is_empty() || tool.is_empty() {
            return None;
        }
        Some(Self { server, tool })
    }
}

impl fmt::Display for QualifiedToolName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.server, TOOL_NAME_SEPARATOR, self.tool)
    }
}
