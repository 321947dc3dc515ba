//! Per-day attendance logs for rollcall.
//!
//! Each calendar day gets its own CSV file under the logs directory, named
//! `YYYY-MM-DD.csv` and created lazily on the first sign-in of that day. Rows
//! are append-only; nothing here mutates or deletes a log once written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::member::{AttendanceRecord, Member, TIMESTAMP_FORMAT};
use crate::roster::{extract_fields, resolve_columns};

/// Required daily log columns, in the order they are written.
pub const LOG_COLUMNS: [&str; 6] = [
    "Student ID",
    "First Name",
    "Last Name",
    "Email",
    "Mobile",
    "Timestamp",
];

/// Outcome of a sign-in attempt against one day's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignIn {
    /// A new row was appended for this member.
    Recorded,
    /// The member already has a row in today's log; nothing was written.
    AlreadySignedIn,
}

/// The collection of per-day sign-in logs.
///
/// Logs are always read fresh from storage; there is no cache between calls.
#[derive(Debug)]
pub struct AttendanceLog {
    /// Directory holding one CSV file per day.
    dir: PathBuf,
}

impl AttendanceLog {
    /// Open the log collection, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;
            info!("created log directory {}", dir.display());
        }
        Ok(Self { dir })
    }

    /// Directory holding the per-day log files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for the given day.
    #[must_use]
    pub fn log_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.csv", day.format("%Y-%m-%d")))
    }

    /// Whether the member already has a row in the given day's log.
    ///
    /// A missing log file means nobody has signed in that day: `false`, no
    /// error. The scan skips the header row and compares the entire first
    /// field of each data row, so id `"1"` never matches a stored id `"10"`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing log file cannot be read.
    pub fn has_signed_in(&self, member_id: &str, day: NaiveDate) -> Result<bool> {
        let path = self.log_path(day);
        if !path.exists() {
            return Ok(false);
        }

        let contents = fs::read_to_string(&path)?;
        Ok(contents
            .lines()
            .skip(1) // header row
            .any(|line| line.split(',').next() == Some(member_id)))
    }

    /// Record a sign-in: check today's log, then append one snapshot row.
    ///
    /// The day is taken from the timestamp's date. Returns
    /// [`SignIn::AlreadySignedIn`] with no write if the member already has a
    /// row for that day. The header row is written first when the file is new
    /// or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be read or appended to.
    pub fn record_sign_in(&self, member: &Member, timestamp: NaiveDateTime) -> Result<SignIn> {
        let day = timestamp.date();
        if self.has_signed_in(&member.id, day)? {
            debug!("member {} already signed in on {}", member.id, day);
            return Ok(SignIn::AlreadySignedIn);
        }

        let record = AttendanceRecord::snapshot(member, timestamp);
        let path = self.log_path(day);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?;

        let mut row = String::new();
        let is_empty = file
            .metadata()
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?
            .len()
            == 0;
        if is_empty {
            row.push_str(&LOG_COLUMNS.join(","));
            row.push('\n');
        }
        row.push_str(&format!(
            "{},{},{},{},{},{}\n",
            record.member_id,
            record.first_name,
            record.last_name,
            record.email,
            record.mobile,
            record.timestamp_string()
        ));

        file.write_all(row.as_bytes())
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?;

        info!("recorded sign-in for member {} on {}", member.id, day);
        Ok(SignIn::Recorded)
    }

    /// Enumerate the days that have a log file, sorted ascending.
    ///
    /// Directory entries that are not `YYYY-MM-DD.csv` are skipped with a
    /// warning; every actual log day appears exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn days(&self) -> Result<Vec<NaiveDate>> {
        let mut days = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            let stem = path.file_stem().and_then(|stem| stem.to_str());
            match stem.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()) {
                Some(day) => days.push(day),
                None => warn!("ignoring non-log file {}", path.display()),
            }
        }
        days.sort_unstable();
        Ok(days)
    }

    /// Parse one day's log file top-to-bottom, header skipped.
    ///
    /// A missing log file yields an empty sequence. A malformed row fails the
    /// whole read; nothing is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the header is missing a
    /// required column, or a row is malformed.
    pub fn read_log(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let path = self.log_path(day);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        let mut lines = contents.lines();

        let header = lines.next().unwrap_or("");
        let indexes = resolve_columns(&path, header, &LOG_COLUMNS)?;

        let mut records = Vec::new();
        for (offset, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = offset + 2;
            let mut fields = extract_fields(&path, line, line_no, &indexes)?.into_iter();
            let member_id = fields.next().unwrap_or_default();
            let first_name = fields.next().unwrap_or_default();
            let last_name = fields.next().unwrap_or_default();
            let email = fields.next().unwrap_or_default();
            let mobile = fields.next().unwrap_or_default();
            let raw_timestamp = fields.next().unwrap_or_default();

            let timestamp = NaiveDateTime::parse_from_str(&raw_timestamp, TIMESTAMP_FORMAT)
                .map_err(|_| Error::InvalidTimestamp {
                    path: path.clone(),
                    line: line_no,
                    value: raw_timestamp,
                })?;

            records.push(AttendanceRecord {
                member_id,
                first_name,
                last_name,
                email,
                mobile,
                timestamp,
            });
        }
        Ok(records)
    }
}
