//! Stateless permission check
//!
//! Answers a single question from raw allow-lists without any precompiled
//! state. Callers holding the same lists across many calls should compile an
//! [`AccessPolicy`] once instead.

use crate::access_control::policy::AccessPolicy;

/// Decide whether `tool_name` may be invoked on `server_id`.
///
/// Precedence:
/// 1. A non-empty `allowed_tools` decides alone. `"*"` grants everything,
///    otherwise the exact composite name must be listed.
/// 2. Otherwise a non-empty `allowed_servers` must contain `server_id`.
/// 3. With both lists empty, everything is allowed.
///
/// Tool names are compared as opaque, case-sensitive strings.
pub fn check_permission<S, T>(
    allowed_servers: &[S],
    allowed_tools: &[T],
    server_id: &str,
    tool_name: &str,
) -> bool
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    AccessPolicy::from_lists(allowed_servers, allowed_tools).permits(server_id, tool_name)
}
