//! CLI command definitions for the `mediachat` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! noun (e.g., `mediachat identity create`, `mediachat sessions list`).

pub mod identity;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Multimedia chat sessions over a REST API.
#[derive(Parser)]
#[command(name = "mediachat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` from config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` from config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage identities and their API keys.
    Identity {
        #[command(subcommand)]
        action: IdentityCommand,
    },

    /// Browse stored sessions.
    Sessions {
        #[command(subcommand)]
        action: SessionsCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum IdentityCommand {
    /// Create an identity and print its API key (shown once).
    Create {
        /// Display name for the identity.
        name: String,
    },

    /// List identities.
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List the sessions owned by an identity.
    #[command(alias = "ls")]
    List {
        /// Identity id that owns the sessions.
        #[arg(long)]
        owner: String,
    },

    /// Print a session's messages.
    Show {
        /// Session id.
        session_id: String,

        /// Identity id requesting the session; must be its owner.
        #[arg(long)]
        owner: String,
    },
}

/// Compact age of a timestamp for table cells.
pub(crate) fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let diff = chrono::Utc::now() - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
