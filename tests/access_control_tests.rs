//! Access control integration tests
//!
//! Covers the allow-list precedence rules:
//! - Tool allow-list (exact names or "*") decides alone when configured
//! - Server allow-list applies only without a tool allow-list
//! - Neither configured allows everything
//! - Caller profiles replace the default lists, they do not merge with them

use rstest::rstest;
use std::collections::HashMap;
use toolgate::access_control::{AccessPolicy, AccessResolver, ToolScope, check_permission};
use toolgate::config::{AccessControlConfig, CallerAccessConfig};

// =============================================================================
// Test Helpers
// =============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// 1. Reference scenarios
// =============================================================================

#[rstest]
#[case::empty_config_allows_all(&[], &[], "1", "srv1__tool1", true)]
#[case::server_not_listed(&["1", "2"], &[], "3", "srv3__tool1", false)]
#[case::tool_list_without_match(&[], &["srv1__toolA"], "2", "srv2__toolA", false)]
#[case::wildcard_allows_any(&[], &["*"], "99", "srv99__any", true)]
#[case::tool_match_overrides_server_list(&["1"], &["srv2__toolA"], "2", "srv2__toolA", true)]
#[case::tool_list_blocks_listed_server(&["1"], &["srv2__toolA"], "1", "srv1__toolB", false)]
fn test_reference_scenarios(
    #[case] servers: &[&str],
    #[case] tools: &[&str],
    #[case] server_id: &str,
    #[case] tool_name: &str,
    #[case] expected: bool,
) {
    assert_eq!(check_permission(servers, tools, server_id, tool_name), expected);
}

// =============================================================================
// 2. Precedence properties
// =============================================================================

mod precedence {
    use super::*;

    const SERVER_LISTS: &[&[&str]] = &[&[], &["1"], &["2"], &["1", "2", "3"]];

    #[rstest]
    #[case("1", "srv1__tool1")]
    #[case("", "")]
    #[case("99", "no-separator")]
    fn test_no_restrictions_allow_everything(#[case] server_id: &str, #[case] tool_name: &str) {
        let none: &[&str] = &[];
        assert!(check_permission(none, none, server_id, tool_name));
    }

    #[rstest]
    #[case(&["srv1__toolA"], "1", "srv1__toolA", true)]
    #[case(&["srv1__toolA"], "1", "srv1__toolB", false)]
    #[case(&["srv1__toolA", "srv2__toolB"], "2", "srv2__toolB", true)]
    #[case(&["*"], "7", "srv7__x", true)]
    #[case(&["srv1__toolA", "*"], "7", "srv7__x", true)]
    fn test_servers_have_no_influence_with_tool_list(
        #[case] tools: &[&str],
        #[case] server_id: &str,
        #[case] tool_name: &str,
        #[case] expected: bool,
    ) {
        for &servers in SERVER_LISTS {
            assert_eq!(
                check_permission(servers, tools, server_id, tool_name),
                expected,
                "servers = {:?}",
                servers
            );
        }
    }

    #[test]
    fn test_server_membership_without_tool_list() {
        let servers = ["1", "2"];
        let none: &[&str] = &[];
        assert!(check_permission(&servers, none, "1", "anything"));
        assert!(check_permission(&servers, none, "2", "anything"));
        assert!(!check_permission(&servers, none, "3", "srv1__tool1"));
        // Server ids are exact and case-sensitive
        assert!(!check_permission(&["a"], none, "A", "srvA__tool"));
    }

    #[test]
    fn test_owned_and_borrowed_lists_agree() {
        let servers = strings(&["1"]);
        let tools = strings(&["srv2__toolA"]);
        assert_eq!(
            check_permission(&servers, &tools, "1", "srv1__toolB"),
            check_permission(&["1"], &["srv2__toolA"], "1", "srv1__toolB"),
        );
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let servers = ["1"];
        let tools = ["srv2__toolA"];
        let first = check_permission(&servers, &tools, "2", "srv2__toolA");
        for _ in 0..10 {
            assert_eq!(check_permission(&servers, &tools, "2", "srv2__toolA"), first);
        }
    }
}

// =============================================================================
// 3. Compiled policies
// =============================================================================

mod policy {
    use super::*;

    #[test]
    fn test_policy_variants() {
        let none: &[&str] = &[];
        assert_eq!(AccessPolicy::from_lists(none, none), AccessPolicy::Unrestricted);
        assert!(matches!(
            AccessPolicy::from_lists(&["1"], none),
            AccessPolicy::ServerRestricted(_)
        ));
        assert_eq!(
            AccessPolicy::from_lists(&["1"], &["*"]),
            AccessPolicy::ToolRestricted(ToolScope::AllTools)
        );
        assert!(matches!(
            AccessPolicy::from_lists(none, &["srv1__a"]),
            AccessPolicy::ToolRestricted(ToolScope::Specific(_))
        ));
    }

    #[test]
    fn test_policy_matches_stateless_check() {
        let cases: &[(&[&str], &[&str], &str, &str)] = &[
            (&[], &[], "1", "srv1__tool1"),
            (&["1", "2"], &[], "3", "srv3__tool1"),
            (&[], &["srv1__toolA"], "2", "srv2__toolA"),
            (&["1"], &["srv2__toolA"], "2", "srv2__toolA"),
            (&["1"], &["srv2__toolA"], "1", "srv1__toolB"),
        ];

        for &(servers, tools, server_id, tool_name) in cases {
            let policy = AccessPolicy::from_lists(servers, tools);
            assert_eq!(
                policy.permits(server_id, tool_name),
                check_permission(servers, tools, server_id, tool_name)
            );
            assert_eq!(
                policy.check(server_id, tool_name).is_allowed(),
                policy.permits(server_id, tool_name)
            );
        }
    }

    #[test]
    fn test_policy_shared_across_threads() {
        let policy = std::sync::Arc::new(AccessPolicy::from_lists(&["1"], &["srv2__toolA"]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let policy = policy.clone();
                std::thread::spawn(move || {
                    policy.permits("2", "srv2__toolA") && !policy.permits("1", "srv1__toolB")
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}

// =============================================================================
// 4. Caller profiles
// =============================================================================

mod callers {
    use super::*;

    fn config() -> AccessControlConfig {
        let mut callers = HashMap::new();
        callers.insert(
            "ci".to_string(),
            CallerAccessConfig {
                allowed_servers: strings(&["1"]),
                allowed_tools: strings(&["srv2__toolA"]),
            },
        );
        callers.insert("open".to_string(), CallerAccessConfig::default());

        AccessControlConfig {
            allowed_servers: strings(&["1"]),
            allowed_tools: vec![],
            callers,
        }
    }

    #[test]
    fn test_default_lists_for_anonymous_caller() {
        let resolver = AccessResolver::new(&config());
        assert!(resolver.is_permitted(None, "1", "srv1__toolB"));
        assert!(!resolver.is_permitted(None, "2", "srv2__toolA"));
    }

    #[test]
    fn test_profile_lists_replace_defaults() {
        let resolver = AccessResolver::new(&config());
        assert!(resolver.is_permitted(Some("ci"), "2", "srv2__toolA"));
        assert!(!resolver.is_permitted(Some("ci"), "1", "srv1__toolB"));
    }

    #[test]
    fn test_empty_profile_is_unrestricted() {
        let resolver = AccessResolver::new(&config());
        assert!(resolver.policy_for(Some("open")).is_unrestricted());
        assert!(resolver.is_permitted(Some("open"), "9", "srv9__x"));
    }

    #[test]
    fn test_unknown_caller_falls_back_to_defaults() {
        let resolver = AccessResolver::new(&config());
        assert!(resolver.is_permitted(Some("nobody"), "1", "srv1__toolB"));
        assert!(!resolver.is_permitted(Some("nobody"), "2", "srv2__toolA"));
    }

    #[test]
    fn test_require_reports_denial() {
        let resolver = AccessResolver::new(&config());
        let err = resolver.require(None, "2", "srv2__toolA").unwrap_err();
        assert_eq!(err.server, "2");
        assert_eq!(err.tool, "srv2__toolA");
        assert!(err.to_string().contains("allowed servers"));
    }
}
