//! Clap derive structures for the `netglance` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netglance -- network connectivity, public IP, and WiFi signal at a glance
#[derive(Debug, Parser)]
#[command(
    name = "netglance",
    version,
    about = "Watch network connectivity, public IP, geolocation, and WiFi signal",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend endpoint returning the public IP report
    #[arg(long, short = 'b', env = "NETGLANCE_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Backend request timeout in seconds
    #[arg(long, env = "NETGLANCE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the public IP and print the current status once
    Status(StatusArgs),

    /// Monitor connectivity, public IP, and WiFi signal until interrupted
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Skip the WiFi signal probe
    #[arg(long)]
    pub no_wifi: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Disable WiFi signal sampling
    #[arg(long)]
    pub no_wifi: bool,
}
