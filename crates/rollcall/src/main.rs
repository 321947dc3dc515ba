//! `rollcall` - CLI for the club attendance tracker
//!
//! This binary wires the front-desk operations to a command-line surface:
//! sign-in, registration, and the admin-gated roster and log views.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::bail;
use clap::Parser;

use rollcall::cli::{Cli, Command, ConfigCommand, LogsCommand, RegisterCommand, RosterCommand};
use rollcall::member::parse_day;
use rollcall::{init_logging, Config, FrontDesk, NewMember};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Config commands don't need the stores
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        command => command,
    };

    // A roster that fails to load degrades to empty; report and continue.
    let (mut desk, load_error) = FrontDesk::open(&config)?;
    if let Some(err) = load_error {
        eprintln!("Error: failed to load roster: {err}");
    }

    match command {
        Command::Signin(cmd) => {
            let status = desk.attempt_sign_in(&cmd.id)?;
            println!("{}", status.message());
            Ok(())
        }
        Command::Register(cmd) => handle_register(&mut desk, &cmd),
        Command::Roster(cmd) => handle_roster(&desk, &cmd),
        Command::Logs(cmd) => handle_logs(&desk, &cmd),
        Command::Config(_) => Ok(()),
    }
}

fn handle_register(desk: &mut FrontDesk, cmd: &RegisterCommand) -> anyhow::Result<()> {
    let input = NewMember {
        id: cmd.id.clone(),
        first_name: cmd.first_name.clone(),
        last_name: cmd.last_name.clone(),
        email: cmd.email.clone(),
        mobile: cmd.mobile.clone(),
    };
    match desk.attempt_register(&input) {
        Ok(member) => {
            println!("User added successfully! ({})", member.display_name());
            Ok(())
        }
        Err(err) if err.is_validation() => bail!("registration rejected: {err}"),
        Err(err) => Err(err.into()),
    }
}

fn handle_roster(desk: &FrontDesk, cmd: &RosterCommand) -> anyhow::Result<()> {
    if !desk.verify_admin(&cmd.password) {
        bail!("Incorrect Password");
    }

    let members = desk.roster_snapshot()?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<14} {:<14} {:<24} {:<14}",
        "Student ID", "First Name", "Last Name", "Email", "Mobile"
    );
    for member in &members {
        println!(
            "{:<12} {:<14} {:<14} {:<24} {:<14}",
            member.id, member.first_name, member.last_name, member.email, member.mobile
        );
    }
    println!();
    println!("{} member(s)", members.len());
    Ok(())
}

fn handle_logs(desk: &FrontDesk, cmd: &LogsCommand) -> anyhow::Result<()> {
    match cmd {
        LogsCommand::List { password } => {
            if !desk.verify_admin(password) {
                bail!("Incorrect Password");
            }
            let days = desk.log_days()?;
            if days.is_empty() {
                println!("No logs available");
            } else {
                for day in days {
                    println!("{day}");
                }
            }
        }
        LogsCommand::Show {
            day,
            password,
            json,
        } => {
            if !desk.verify_admin(password) {
                bail!("Incorrect Password");
            }
            let day = parse_day(day)?;
            let records = desk.log_snapshot(day)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            println!(
                "{:<12} {:<14} {:<14} {:<24} {:<14} {:<20}",
                "Student ID", "First Name", "Last Name", "Email", "Mobile", "Timestamp"
            );
            for record in &records {
                println!(
                    "{:<12} {:<14} {:<14} {:<24} {:<14} {:<20}",
                    record.member_id,
                    record.first_name,
                    record.last_name,
                    record.email,
                    record.mobile,
                    record.timestamp_string()
                );
            }
            println!();
            println!("{} sign-in(s) on {day}", records.len());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data dir:     {}", config.data_dir().display());
                println!("  Roster file:  {}", config.roster_path().display());
                println!("  Logs dir:     {}", config.logs_dir().display());
                println!();
                println!("[Admin]");
                println!("  Password set: {}", !config.admin.password.is_empty());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
