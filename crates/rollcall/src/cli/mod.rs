//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure for the `rollcall` binary, which
//! stands in for the club's front-desk screen: sign-in, registration, and the
//! admin-gated roster and daily-log views.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, LogsCommand, RegisterCommand, RosterCommand, SignInCommand};

/// rollcall - desk-side attendance tracker
///
/// Members register once, then sign in by id on each visit; each day's
/// sign-ins are appended to a per-day log file.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign a member in for today
    Signin(SignInCommand),

    /// Register a new member
    Register(RegisterCommand),

    /// View the member roster (admin)
    Roster(RosterCommand),

    /// Browse the daily sign-in logs (admin)
    #[command(subcommand)]
    Logs(LogsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
