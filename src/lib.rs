//! Tool gateway access control
//!
//! Decides which backend tools a caller may invoke through a multi-server MCP
//! gateway, and routes composite `<server>__<tool>` names to their backends.
//!
//! ## Access Control Model
//!
//! ```text
//! allowed_tools (if set) → allowed_servers (if set) → allow all
//! ```
//!
//! - `allowed_tools` lists exact composite names, or `"*"` for everything.
//!   When it is non-empty, `allowed_servers` is ignored.
//! - `allowed_servers` lists backend server ids.
//! - With neither configured, every call is allowed.
//!
//! ## Example Configuration
//!
//! ```toml
//! [access_control]
//! allowed_servers = ["1"]
//!
//! [access_control.callers.reporting]
//! allowed_tools = ["srv2__query"]
//!
//! [[backends]]
//! id = "1"
//! name = "srv1"
//! tools = ["build", "deploy"]
//!
//! [[backends]]
//! id = "2"
//! name = "srv2"
//! tools = ["query"]
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod gateway;

// Re-export main types
pub use access_control::{AccessPolicy, AccessResolver, check_permission};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use gateway::ToolRouter;
