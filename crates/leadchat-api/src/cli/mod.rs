//! CLI command definitions for the `leadchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod check;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational sales assistant with lead capture.
#[derive(Parser)]
#[command(name = "leadchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to ~/.leadchat/config.toml).
    #[arg(long, global = true, env = "LEADCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to server.port).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (defaults to server.host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Chat with the assistant in the terminal.
    Chat,

    /// Print the effective configuration (secrets redacted).
    Config,

    /// Verify the LLM provider and SMTP relay credentials.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
