//! Configuration module
//!
//! Loads allow-lists and backend definitions from TOML files and environment
//! variables, then validates them.

pub mod loader;
pub mod types;

pub use loader::{lint_access_control, load_config, load_config_from_str};
pub use types::*;
