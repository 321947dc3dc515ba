//! Roster store for rollcall.
//!
//! The roster is a single CSV file of registered members, loaded in full into
//! an in-memory map at startup and appended to on each registration. It is the
//! single source of truth for "is this identifier a known member, and what are
//! their display fields."

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::member::{Member, NewMember};

/// Required roster columns, in the order they are written.
pub const ROSTER_COLUMNS: [&str; 5] = ["Student ID", "First Name", "Last Name", "Email", "Mobile"];

/// The member roster, backed by an append-only CSV file.
///
/// Duplicate ids in the backing file resolve last-write-wins on load. The
/// in-memory map answers existence queries without I/O; admin snapshots
/// always re-read the file.
#[derive(Debug)]
pub struct Roster {
    /// Path to the backing CSV file.
    path: PathBuf,
    /// In-memory index of the backing file, keyed by member id.
    members: HashMap<String, Member>,
}

impl Roster {
    /// Open the roster at the given path, creating it with a header row if it
    /// does not exist, then loading every member into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or read, if the header
    /// is missing a required column, or if a data row is malformed. Callers
    /// that want the degraded-but-running behavior fall back to
    /// [`Roster::empty`] and surface the error themselves.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_file_with_header(&path, &ROSTER_COLUMNS)?;

        let members = load_members(&path)?;
        info!("loaded {} members from {}", members.len(), path.display());
        Ok(Self { path, members })
    }

    /// An empty roster over the given path, used when loading failed and the
    /// system degrades to a running-but-empty state.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            members: HashMap::new(),
        }
    }

    /// Path to the backing roster file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the given id belongs to a registered member. No I/O.
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    /// Look up a member by id. No I/O.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    /// Number of members currently in memory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the in-memory roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Register a new member: validate, append to the backing file, then
    /// insert into the in-memory map.
    ///
    /// A rejected registration leaves both the file and the map unchanged.
    /// The append and the map insert are not transactional with respect to
    /// each other; the file is the record of truth on next load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if any field is empty after trimming,
    /// [`Error::DuplicateId`] if the id is already registered, or an I/O
    /// error if the append fails.
    pub fn register(&mut self, input: &NewMember) -> Result<Member> {
        let member = input.validate()?;
        if self.exists(&member.id) {
            return Err(Error::duplicate_id(&member.id));
        }

        let row = format!(
            "{},{},{},{},{}\n",
            member.id, member.first_name, member.last_name, member.email, member.mobile
        );
        append_row(&self.path, &row)?;

        debug!("registered member {}", member.id);
        self.members.insert(member.id.clone(), member.clone());
        Ok(member)
    }

    /// Re-read the backing file in full, returning members in file order.
    ///
    /// Used by the admin view; never served from the in-memory map so the
    /// view always reflects what is actually on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn snapshot(&self) -> Result<Vec<Member>> {
        read_member_rows(&self.path)
    }
}

/// Create the file with the given header row if it does not exist yet,
/// creating parent directories as needed.
pub(crate) fn ensure_file_with_header(path: &Path, columns: &[&str]) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let header = format!("{}\n", columns.join(","));
    fs::write(path, header).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("created {} with header row", path.display());
    Ok(())
}

/// Resolve each required column name to its index in the header row.
///
/// Incidental whitespace around labels is trimmed before matching.
pub(crate) fn resolve_columns(
    path: &Path,
    header: &str,
    required: &[&'static str],
) -> Result<Vec<usize>> {
    let labels: Vec<&str> = header.split(',').map(str::trim).collect();
    required
        .iter()
        .map(|&column| {
            labels
                .iter()
                .position(|&label| label == column)
                .ok_or(Error::SchemaMismatch {
                    path: path.to_path_buf(),
                    column,
                })
        })
        .collect()
}

/// Split one data row into fields, pulling out the resolved column indexes.
///
/// `line_no` is 1-based and includes the header line.
pub(crate) fn extract_fields(
    path: &Path,
    line: &str,
    line_no: usize,
    indexes: &[usize],
) -> Result<Vec<String>> {
    let fields: Vec<&str> = line.split(',').collect();
    let needed = indexes.iter().max().map_or(0, |max| max + 1);
    if fields.len() < needed {
        return Err(Error::MalformedRow {
            path: path.to_path_buf(),
            line: line_no,
            expected: needed,
            found: fields.len(),
        });
    }
    Ok(indexes.iter().map(|&i| fields[i].to_string()).collect())
}

/// Append one pre-formatted row to the file, closing the handle before return.
pub(crate) fn append_row(path: &Path, row: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
    file.write_all(row.as_bytes())
        .map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse the roster file into member rows, in file order.
fn read_member_rows(path: &Path) -> Result<Vec<Member>> {
    if !path.exists() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();

    let header = lines.next().unwrap_or("");
    let indexes = resolve_columns(path, header, &ROSTER_COLUMNS)?;

    let mut members = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = extract_fields(path, line, offset + 2, &indexes)?.into_iter();
        members.push(Member {
            id: fields.next().unwrap_or_default(),
            first_name: fields.next().unwrap_or_default(),
            last_name: fields.next().unwrap_or_default(),
            email: fields.next().unwrap_or_default(),
            mobile: fields.next().unwrap_or_default(),
        });
    }
    Ok(members)
}

/// Load the roster file into an id-keyed map. Later rows win on duplicate id.
fn load_members(path: &Path) -> Result<HashMap<String, Member>> {
    let rows = read_member_rows(path)?;
    let mut members = HashMap::with_capacity(rows.len());
    for member in rows {
        members.insert(member.id.clone(), member);
    }
    Ok(members)
}
