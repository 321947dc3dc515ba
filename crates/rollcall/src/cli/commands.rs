//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Sign-in command arguments.
#[derive(Debug, Args)]
pub struct SignInCommand {
    /// The member id to sign in
    pub id: String,
}

/// Register command arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Member id (must be unique)
    #[arg(long)]
    pub id: String,

    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone number
    #[arg(long)]
    pub mobile: String,
}

/// Roster view arguments (admin-gated).
#[derive(Debug, Args)]
pub struct RosterCommand {
    /// Admin password
    #[arg(short, long)]
    pub password: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Daily-log browsing commands (admin-gated).
#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    /// List the days that have a sign-in log
    List {
        /// Admin password
        #[arg(short, long)]
        password: String,
    },

    /// Show one day's sign-in log
    Show {
        /// The day to show (YYYY-MM-DD)
        day: String,

        /// Admin password
        #[arg(short, long)]
        password: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_command_debug() {
        let cmd = SignInCommand {
            id: "42".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("42"));
    }

    #[test]
    fn test_logs_command_debug() {
        let cmd = LogsCommand::Show {
            day: "2024-01-01".to_string(),
            password: "123".to_string(),
            json: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
        assert!(debug_str.contains("2024-01-01"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
