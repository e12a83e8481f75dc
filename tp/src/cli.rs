//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{BACKEND_URL_ENV, PROXY_URL_ENV};

/// TripPlanner - multi-agent travel planning front-end
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Proxy and terminal front-end for AI travel planning with human-in-the-loop approvals",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the proxy server in the foreground
    Serve {
        /// Address to listen on (overrides proxy.listen)
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Interactive plan page (default)
    Tui {
        /// Open an existing plan thread
        #[arg(short, long, value_name = "THREAD_ID")]
        thread: Option<String>,
    },

    /// Submit a trip description and print the result
    Plan {
        /// Free-text trip description
        description: String,

        /// Print the raw response body instead of the rendered view
        #[arg(long)]
        json: bool,
    },

    /// Approve the pending checkpoint of a plan and print the result
    Approve {
        thread_id: String,

        /// Print the raw response body instead of the rendered view
        #[arg(long)]
        json: bool,
    },

    /// Print the current state of a plan
    Show {
        thread_id: String,

        /// Print the raw response body instead of the rendered view
        #[arg(long)]
        json: bool,
    },

    /// Show logs
    Logs {
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Get the log directory
pub fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = get_log_dir().join("tripplanner.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with environment and log locations
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("Environment:\n");
    for (name, purpose) in [
        (BACKEND_URL_ENV, "planning backend the proxy forwards to"),
        (PROXY_URL_ENV, "proxy the tui/plan/approve/show commands talk to"),
    ] {
        let state = match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => "unset".to_string(),
        };
        help.push_str(&format!("  {:<22} {} ({})\n", name, purpose, state));
    }

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}
