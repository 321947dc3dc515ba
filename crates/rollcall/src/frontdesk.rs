//! Front-desk operations for rollcall.
//!
//! This module composes the roster store and the attendance logs into the
//! request/response surface a presentation layer consumes: sign-in attempts,
//! registration, read-only admin snapshots, and the admin gate. The two
//! stores never call each other; they are composed only here.

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::attendance::{AttendanceLog, SignIn};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::member::{AttendanceRecord, Member, NewMember};
use crate::roster::Roster;

/// Outcome of a sign-in attempt, one variant per status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInStatus {
    /// The member signed in; a row was appended to today's log.
    Success {
        /// Display name of the member.
        name: String,
    },
    /// The member already signed in today; nothing was written.
    AlreadySignedIn {
        /// Display name of the member.
        name: String,
    },
    /// The id is not in the roster.
    UnknownId,
    /// The id was empty after trimming.
    EmptyId,
}

impl SignInStatus {
    /// The desk-side status message for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { name } => format!("Welcome, {name}!"),
            Self::AlreadySignedIn { name } => format!("{name} has already signed in today."),
            Self::UnknownId => "Please enter a valid STUDENT ID".to_string(),
            Self::EmptyId => "Please enter a Student ID".to_string(),
        }
    }
}

/// The front desk: roster lookups, sign-ins, and admin views.
#[derive(Debug)]
pub struct FrontDesk {
    roster: Roster,
    logs: AttendanceLog,
    admin_password: String,
}

impl FrontDesk {
    /// Compose a front desk from already-opened stores.
    #[must_use]
    pub fn new(roster: Roster, logs: AttendanceLog, admin_password: impl Into<String>) -> Self {
        Self {
            roster,
            logs,
            admin_password: admin_password.into(),
        }
    }

    /// Open the front desk from configuration.
    ///
    /// A roster that fails to load degrades to an empty roster; the load
    /// error is returned alongside so the caller can surface it. Only a
    /// failure to create the log directory is fatal here.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be created.
    pub fn open(config: &Config) -> Result<(Self, Option<Error>)> {
        let logs = AttendanceLog::open(config.logs_dir())?;

        let roster_path = config.roster_path();
        let (roster, load_error) = match Roster::open(&roster_path) {
            Ok(roster) => (roster, None),
            Err(err) => {
                warn!("roster load failed, continuing with empty roster: {err}");
                (Roster::empty(&roster_path), Some(err))
            }
        };

        Ok((
            Self::new(roster, logs, config.admin.password.as_str()),
            load_error,
        ))
    }

    /// Attempt to sign a member in right now, using the local clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the day's log cannot be read or appended to.
    pub fn attempt_sign_in(&self, id: &str) -> Result<SignInStatus> {
        self.sign_in_at(id, Local::now().naive_local())
    }

    /// Attempt to sign a member in at a specific instant.
    ///
    /// The input id is trimmed before lookup. The day the row lands in is
    /// the timestamp's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the day's log cannot be read or appended to.
    pub fn sign_in_at(&self, id: &str, now: NaiveDateTime) -> Result<SignInStatus> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(SignInStatus::EmptyId);
        }

        let Some(member) = self.roster.get(id) else {
            return Ok(SignInStatus::UnknownId);
        };

        let name = member.display_name();
        match self.logs.record_sign_in(member, now)? {
            SignIn::Recorded => Ok(SignInStatus::Success { name }),
            SignIn::AlreadySignedIn => Ok(SignInStatus::AlreadySignedIn { name }),
        }
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty field or duplicate id, or an
    /// I/O error if the roster append fails.
    pub fn attempt_register(&mut self, input: &NewMember) -> Result<Member> {
        self.roster.register(input)
    }

    /// Read-only roster snapshot for the admin view, fresh from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster file cannot be read or parsed.
    pub fn roster_snapshot(&self) -> Result<Vec<Member>> {
        self.roster.snapshot()
    }

    /// The days that have a log, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be read.
    pub fn log_days(&self) -> Result<Vec<NaiveDate>> {
        self.logs.days()
    }

    /// Read-only snapshot of one day's log for the admin view.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be read or parsed.
    pub fn log_snapshot(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        self.logs.read_log(day)
    }

    /// Check the admin gate: exact equality against the configured password.
    ///
    /// Not a security boundary; it gates the desk-side admin views only.
    #[must_use]
    pub fn verify_admin(&self, secret: &str) -> bool {
        secret == self.admin_password
    }

    /// The underlying roster store.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_desk() -> (TempDir, FrontDesk) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let roster = Roster::open(dir.path().join("members.csv")).unwrap();
        let logs = AttendanceLog::open(dir.path().join("daily_logs")).unwrap();
        (dir, FrontDesk::new(roster, logs, "123"))
    }

    fn ada() -> NewMember {
        NewMember {
            id: "42".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lin".to_string(),
            email: "a@x.com".to_string(),
            mobile: "555-0001".to_string(),
        }
    }

    fn jan1() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_sign_in_empty_id() {
        let (_dir, desk) = temp_desk();
        let status = desk.sign_in_at("   ", jan1()).unwrap();
        assert_eq!(status, SignInStatus::EmptyId);
        assert_eq!(status.message(), "Please enter a Student ID");
    }

    #[test]
    fn test_sign_in_unknown_id() {
        let (_dir, desk) = temp_desk();
        let status = desk.sign_in_at("99", jan1()).unwrap();
        assert_eq!(status, SignInStatus::UnknownId);
        assert_eq!(status.message(), "Please enter a valid STUDENT ID");
    }

    #[test]
    fn test_sign_in_success_then_already() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();

        let status = desk.sign_in_at("42", jan1()).unwrap();
        assert_eq!(
            status,
            SignInStatus::Success {
                name: "Ada Lin".to_string()
            }
        );
        assert_eq!(status.message(), "Welcome, Ada Lin!");

        let status = desk.sign_in_at("42", jan1()).unwrap();
        assert_eq!(
            status,
            SignInStatus::AlreadySignedIn {
                name: "Ada Lin".to_string()
            }
        );
        assert_eq!(status.message(), "Ada Lin has already signed in today.");
    }

    #[test]
    fn test_sign_in_trims_input() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();

        let status = desk.sign_in_at("  42  ", jan1()).unwrap();
        assert!(matches!(status, SignInStatus::Success { .. }));
    }

    #[test]
    fn test_sign_in_writes_expected_log_row() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();
        desk.sign_in_at("42", jan1()).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = desk.log_snapshot(day).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_id, "42");
        assert!(records[0].timestamp_string().starts_with("2024-01-01"));
    }

    #[test]
    fn test_register_then_snapshot() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();

        let snapshot = desk.roster_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "42");
    }

    #[test]
    fn test_register_duplicate_is_rejected() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();

        let err = desk.attempt_register(&ada()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_log_days_after_sign_ins() {
        let (_dir, mut desk) = temp_desk();
        desk.attempt_register(&ada()).unwrap();

        assert!(desk.log_days().unwrap().is_empty());
        desk.sign_in_at("42", jan1()).unwrap();
        assert_eq!(
            desk.log_days().unwrap(),
            vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]
        );
    }

    #[test]
    fn test_verify_admin() {
        let (_dir, desk) = temp_desk();
        assert!(desk.verify_admin("123"));
        assert!(!desk.verify_admin("1234"));
        assert!(!desk.verify_admin(""));
    }

    #[test]
    fn test_open_degrades_on_bad_roster() {
        let dir = TempDir::new().unwrap();
        let roster_path = dir.path().join("members.csv");
        // Header is missing the Email column.
        std::fs::write(&roster_path, "Student ID,First Name,Last Name,Mobile\n").unwrap();

        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());

        let (desk, load_error) = FrontDesk::open(&config).unwrap();
        assert!(desk.roster().is_empty());
        assert!(matches!(
            load_error,
            Some(Error::SchemaMismatch { column: "Email", .. })
        ));
    }

    #[test]
    fn test_open_fresh_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().join("club"));

        let (desk, load_error) = FrontDesk::open(&config).unwrap();
        assert!(load_error.is_none());
        assert!(desk.roster().is_empty());
        assert!(dir.path().join("club/members.csv").exists());
        assert!(dir.path().join("club/daily_logs").exists());
    }

    #[test]
    fn test_prefix_ids_do_not_collide_on_sign_in() {
        let (_dir, mut desk) = temp_desk();

        let mut one = ada();
        one.id = "1".to_string();
        desk.attempt_register(&one).unwrap();

        let mut ten = ada();
        ten.id = "10".to_string();
        desk.attempt_register(&ten).unwrap();

        desk.sign_in_at("10", jan1()).unwrap();
        let status = desk.sign_in_at("1", jan1()).unwrap();
        assert!(matches!(status, SignInStatus::Success { .. }));
    }
}
