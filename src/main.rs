//! toolgate CLI
//!
//! Loads gateway access configuration and answers access questions from the
//! command line.

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use toolgate::{
    access_control::{AccessDecision, AccessResolver},
    config::{AppConfig, LogFormat, lint_access_control, load_config},
    gateway::{BackendRegistry, ToolRouter},
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// toolgate - allow-list access control for a multi-server tool gateway
#[derive(Parser, Debug)]
#[command(name = "toolgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "TOOLGATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "TOOLGATE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a tool may be invoked on a server
    Check {
        /// Backend server id
        #[arg(long)]
        server: String,

        /// Composite tool name (<server>__<tool>)
        #[arg(long)]
        tool: String,

        /// Caller profile name
        #[arg(long)]
        caller: Option<String>,
    },

    /// Resolve a composite tool name to its backend and authorize it
    Route {
        /// Composite tool name (<server>__<tool>)
        #[arg(long)]
        tool: String,

        /// Caller profile name
        #[arg(long)]
        caller: Option<String>,
    },

    /// List the tools a caller may invoke
    List {
        /// Caller profile name
        #[arg(long)]
        caller: Option<String>,

        /// Print JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Show the effective policy for a caller
    Policy {
        /// Caller profile name
        #[arg(long)]
        caller: Option<String>,
    },
}

fn init_logging(config: &AppConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backends = config.backends.len(),
        callers = config.access_control.callers.len(),
        "Loaded gateway configuration"
    );

    for finding in lint_access_control(&config.access_control) {
        warn!("{}", finding);
    }

    let access = Arc::new(AccessResolver::new(&config.access_control));

    match args.command {
        Command::Check {
            server,
            tool,
            caller,
        } => match access.check(caller.as_deref(), &server, &tool) {
            AccessDecision::Allowed => println!("allowed"),
            AccessDecision::Denied(reason) => {
                println!("denied: {}", reason);
                bail!("access denied");
            }
        },
        Command::Route { tool, caller } => {
            let registry = BackendRegistry::new(&config.backends)?;
            let router = ToolRouter::new(registry, access);
            let route = router
                .route(caller.as_deref(), &tool)
                .inspect_err(|e| error!(error = %e, "Routing failed"))?;
            println!("{} -> server {} tool {}", route.qualified_name, route.server_id, route.tool);
        }
        Command::List { caller, json } => {
            let registry = BackendRegistry::new(&config.backends)?;
            let router = ToolRouter::new(registry, access);
            let tools = router.list_tools(caller.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&tools)?);
            } else {
                for tool in tools {
                    println!("{}", tool.name);
                }
            }
        }
        Command::Policy { caller } => {
            println!("{}", access.policy_for(caller.as_deref()));
            if caller.is_none() && !access.callers().is_empty() {
                println!("profiles: {}", access.callers().join(", "));
            }
        }
    }

    Ok(())
}
