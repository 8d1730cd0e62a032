//! Access control module
//!
//! Decides whether a caller may invoke a composite `<server>__<tool>` name on
//! a backend server, using two positive allow-lists.
//!
//! ## Precedence
//!
//! 1. **Tool allow-list** - if configured, it alone decides. `"*"` grants every
//!    tool on every server; otherwise the exact composite name must be listed.
//! 2. **Server allow-list** - consulted only when no tool list is configured.
//! 3. **Neither configured** - every call is allowed.
//!
//! A tool list never combines with a server list: configuring any tool entry
//! makes the server list inert for that caller.
//!
//! ## Example Configuration
//!
//! ```toml
//! [access_control]
//! allowed_servers = ["1", "2"]         # Default: only servers 1 and 2
//!
//! [access_control.callers.ci]
//! allowed_tools = ["srv1__build"]      # CI may call exactly one tool
//!
//! [access_control.callers.admin]
//! allowed_tools = ["*"]                # Everything
//! ```

pub mod evaluator;
pub mod policy;
pub mod resolver;
pub mod tool_name;

pub use evaluator::check_permission;
pub use policy::{AccessDecision, AccessPolicy, ToolScope, WILDCARD};
pub use resolver::AccessResolver;
pub use tool_name::{QualifiedToolName, TOOL_NAME_SEPARATOR, qualify};
