//! Gateway routing
//!
//! Backends are registered under a name prefix; callers address tools as
//! `<prefix>__<tool>`. Every routed call is authorized against the caller's
//! access policy, using the backend's server id.

pub mod registry;
pub mod router;

pub use registry::{Backend, BackendRegistry};
pub use router::{Route, ToolListing, ToolRouter};
