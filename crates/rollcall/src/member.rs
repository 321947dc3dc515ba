//! Core data types for rollcall.
//!
//! This module defines the member record held by the roster and the
//! per-sign-in attendance record written to the daily logs.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Timestamp format used in daily log rows.
///
/// Whole-second local-time precision, lexically sortable.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A registered club member.
///
/// Records are immutable once registered; there is no edit or delete
/// operation anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Externally supplied unique identifier (the roster key).
    pub id: String,
    /// Display first name.
    pub first_name: String,
    /// Display last name.
    pub last_name: String,
    /// Contact email, format unvalidated.
    pub email: String,
    /// Contact phone number, format unvalidated.
    pub mobile: String,
}

impl Member {
    /// The member's display name, as shown in sign-in status messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration input: the five roster fields before validation.
///
/// `validate` trims surrounding whitespace and rejects any empty field,
/// producing the `Member` that will be appended to the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMember {
    /// Requested member id.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub mobile: String,
}

impl NewMember {
    /// Validate the registration input, returning the trimmed member record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first field that is empty
    /// after trimming, or [`Error::InvalidField`] for a field containing a
    /// comma or line break, which the row format cannot hold.
    pub fn validate(&self) -> Result<Member> {
        let member = Member {
            id: self.id.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
        };

        check_field(&member.id, "Student ID")?;
        check_field(&member.first_name, "First Name")?;
        check_field(&member.last_name, "Last Name")?;
        check_field(&member.email, "Email")?;
        check_field(&member.mobile, "Mobile")?;

        Ok(member)
    }
}

/// Check one trimmed registration field: non-empty, and free of the
/// characters the row format reserves (the field delimiter and line breaks).
fn check_field(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::missing_field(field));
    }
    if value.contains([',', '\r', '\n']) {
        return Err(Error::invalid_field(field));
    }
    Ok(())
}

/// One sign-in event in a daily log.
///
/// Holds a snapshot of the member's display fields captured at sign-in time.
/// Later roster changes never rewrite past rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Id of the member who signed in.
    pub member_id: String,
    /// First name at sign-in time.
    pub first_name: String,
    /// Last name at sign-in time.
    pub last_name: String,
    /// Email at sign-in time.
    pub email: String,
    /// Mobile at sign-in time.
    pub mobile: String,
    /// The sign-in instant, local time, whole-second precision.
    pub timestamp: NaiveDateTime,
}

impl AttendanceRecord {
    /// Snapshot a member's fields at the given sign-in instant.
    #[must_use]
    pub fn snapshot(member: &Member, timestamp: NaiveDateTime) -> Self {
        Self {
            member_id: member.id.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            mobile: member.mobile.clone(),
            timestamp,
        }
    }

    /// The calendar day this record belongs to.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The timestamp rendered in log-row form.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Parse a day identifier (`YYYY-MM-DD`) as used in log file names.
///
/// # Errors
///
/// Returns [`Error::InvalidDay`] if the input is not a valid calendar date.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::invalid_day(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> NewMember {
        NewMember {
            id: "42".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lin".to_string(),
            email: "a@x.com".to_string(),
            mobile: "555-0001".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let member = ada().validate().unwrap();
        assert_eq!(member.id, "42");
        assert_eq!(member.display_name(), "Ada Lin");
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let mut input = ada();
        input.id = "  42 ".to_string();
        input.first_name = " Ada\t".to_string();

        let member = input.validate().unwrap();
        assert_eq!(member.id, "42");
        assert_eq!(member.first_name, "Ada");
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut input = ada();
        input.id = "   ".to_string();

        let err = input.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MissingField { field: "Student ID" }
        ));
    }

    #[test]
    fn test_validate_rejects_each_empty_field() {
        for field in 0..5 {
            let mut input = ada();
            match field {
                0 => input.id.clear(),
                1 => input.first_name.clear(),
                2 => input.last_name.clear(),
                3 => input.email.clear(),
                _ => input.mobile.clear(),
            }
            assert!(input.validate().is_err());
        }
    }

    #[test]
    fn test_validate_rejects_delimiter_characters() {
        let mut input = ada();
        input.id = "a,b".to_string();
        let err = input.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidField { field: "Student ID" }
        ));

        let mut input = ada();
        input.email = "a@x.com\nextra".to_string();
        let err = input.validate().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidField { field: "Email" }));

        let mut input = ada();
        input.last_name = "Lin\r".to_string();
        // The trailing \r is trimmed as whitespace, so this one is fine.
        assert!(input.validate().is_ok());

        let mut input = ada();
        input.last_name = "Li\rn".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let member = ada().validate().unwrap();
        let when = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let record = AttendanceRecord::snapshot(&member, when);
        assert_eq!(record.member_id, "42");
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.timestamp_string(), "2024-01-01 09:30:00");
    }

    #[test]
    fn test_timestamp_format_sorts_lexically() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let earlier = day.and_hms_opt(9, 5, 0).unwrap();
        let later = day.and_hms_opt(10, 0, 0).unwrap();

        let a = earlier.format(TIMESTAMP_FORMAT).to_string();
        let b = later.format(TIMESTAMP_FORMAT).to_string();
        assert!(a < b);
    }

    #[test]
    fn test_parse_day() {
        let day = parse_day("2024-01-01").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(parse_day("01/01/2024").is_err());
        assert!(parse_day("2024-13-01").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn test_member_serialization() {
        let member = ada().validate().unwrap();
        let json = serde_json::to_string(&member).unwrap();
        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(member, back);
    }
}
