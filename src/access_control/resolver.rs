//! Per-caller access resolution
//!
//! Compiles one [`AccessPolicy`] for the default caller and one per named
//! caller profile. Callers without a profile, and anonymous calls, use the
//! default policy.

use crate::access_control::policy::{AccessDecision, AccessPolicy};
use crate::config::{AccessControlConfig, CallerAccessConfig};
use crate::error::AccessDeniedError;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Access control resolver
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AccessResolver {
    /// Policy for callers without a profile
    default_policy: AccessPolicy,
    /// Policies for named callers
    callers: HashMap<String, AccessPolicy>,
}

impl AccessResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &AccessControlConfig) -> Self {
        let default_policy = AccessPolicy::from_lists(&config.allowed_servers, &config.allowed_tools);

        let callers = config
            .callers
            .iter()
            .map(|(name, caller)| (name.clone(), Self::compile_caller(caller)))
            .collect();

        Self {
            default_policy,
            callers,
        }
    }

    fn compile_caller(config: &CallerAccessConfig) -> AccessPolicy {
        AccessPolicy::from_lists(&config.allowed_servers, &config.allowed_tools)
    }

    /// Policy that applies to `caller`
    pub fn policy_for(&self, caller: Option<&str>) -> &AccessPolicy {
        match caller.and_then(|name| self.callers.get(name)) {
            Some(policy) => policy,
            None => {
                if let Some(name) = caller {
                    trace!(caller = name, "No caller profile, using default policy");
                }
                &self.default_policy
            }
        }
    }

    /// Check if a tool call is permitted
    pub fn check(&self, caller: Option<&str>, server_id: &str, tool_name: &str) -> AccessDecision {
        let policy = self.policy_for(caller);
        let decision = policy.check(server_id, tool_name);

        debug!(
            caller = ?caller,
            server = server_id,
            tool = tool_name,
            policy = policy.describe(),
            allowed = decision.is_allowed(),
            "Checked access"
        );

        decision
    }

    /// Check if a tool call is permitted, without a reason
    pub fn is_permitted(&self, caller: Option<&str>, server_id: &str, tool_name: &str) -> bool {
        self.policy_for(caller).permits(server_id, tool_name)
    }

    /// Check if a tool call is permitted, returning an error if denied
    pub fn require(
        &self,
        caller: Option<&str>,
        server_id: &str,
        tool_name: &str,
    ) -> Result<(), AccessDeniedError> {
        match self.check(caller, server_id, tool_name) {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Denied(reason) => {
                Err(AccessDeniedError::new(tool_name, server_id, reason))
            }
        }
    }

    /// Names of the configured caller profiles, sorted
    pub fn callers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.callers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
