//! `rollcall` - desk-side attendance tracker for a small club
//!
//! This library provides the attendance ledger: a CSV-backed member roster,
//! per-day append-only sign-in logs, and the front-desk operations a
//! presentation layer consumes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod attendance;
pub mod cli;
pub mod config;
pub mod error;
pub mod frontdesk;
pub mod logging;
pub mod member;
pub mod roster;

pub use attendance::{AttendanceLog, SignIn};
pub use config::Config;
pub use error::{Error, Result};
pub use frontdesk::{FrontDesk, SignInStatus};
pub use logging::init_logging;
pub use member::{AttendanceRecord, Member, NewMember};
pub use roster::Roster;
