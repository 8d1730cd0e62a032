//! Error types for toolgate
//!
//! Access decisions themselves never fail. Errors only appear around them:
//! loading configuration, routing a composite tool name, and surfacing a
//! denial to the caller.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDeniedError),

    #[error("Routing error: {0}")]
    Route(#[from] RouteError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// A call rejected by the caller's access policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Access denied for tool '{tool}' on server '{server}': {reason}")]
pub struct AccessDeniedError {
    pub tool: String,
    pub server: String,
    pub reason: String,
}

impl AccessDeniedError {
    pub fn new(
        tool: impl Into<String>,
        server: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            server: server.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning a composite tool name into a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Malformed tool name '{0}': expected '<server>__<tool>'")]
    MalformedName(String),

    #[error("Unknown backend server '{0}'")]
    UnknownBackend(String),

    #[error("Backend '{backend}' has no tool named '{tool}'")]
    UnknownTool { backend: String, tool: String },

    #[error(transparent)]
    AccessDenied(#[from] AccessDeniedError),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_display() {
        let err = AccessDeniedError::new("srv1__toolB", "1", "not listed");
        assert_eq!(err.tool, "srv1__toolB");
        assert_eq!(err.server, "1");
        assert_eq!(
            err.to_string(),
            "Access denied for tool 'srv1__toolB' on server '1': not listed"
        );
    }

    #[test]
    fn test_route_error_wraps_denial() {
        let denied = AccessDeniedError::new("srv3__tool1", "3", "not listed");
        let err: RouteError = denied.clone().into();
        assert_eq!(err, RouteError::AccessDenied(denied.clone()));
        assert_eq!(err.to_string(), denied.to_string());

        let app: AppError = err.into();
        assert!(matches!(app, AppError::Route(RouteError::AccessDenied(_))));
    }
}
