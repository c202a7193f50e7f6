//! Parsing `git status --porcelain` output into [`ChangeRecord`]s.
//!
//! A porcelain v1 line is `XY PATH` or `XY ORIG -> PATH` where `X` is the index
//! marker and `Y` the working-tree marker. Paths git considers unusual are
//! C-quoted, e.g. `"caf\303\251.md"`, and are unquoted here.
//!
//! Lines that do not have this shape never abort a listing: they come out as a
//! record with [`MALFORMED_FLAG`] markers so the user still sees them.

use crate::core::config::PushyConfig;
use crate::core::error::{PushyError, Result};
use crate::core::status_flag::StatusFlag;

/// Marker given to both flags of a line that could not be parsed
pub const MALFORMED_FLAG: StatusFlag = StatusFlag::Unknown('X');

const RENAME_SEPARATOR: &str = " -> ";

/// One changed path as reported by git
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub working: StatusFlag,
    pub index: StatusFlag,
    pub path: String,
    /// Set only for renames and copies
    pub orig_path: Option<String>,
}

impl ChangeRecord {
    pub fn new(index: StatusFlag, working: StatusFlag, path: impl Into<String>) -> Self {
        Self {
            working,
            index,
            path: path.into(),
            orig_path: None,
        }
    }

    pub fn with_orig_path(mut self, orig_path: impl Into<String>) -> Self {
        self.orig_path = Some(orig_path.into());
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.index == StatusFlag::Deleted || self.working == StatusFlag::Deleted
    }
}

pub struct StatusParser;

impl StatusParser {
    /// Parse every line, recovering malformed lines instead of failing
    pub fn parse(lines: &[String]) -> Vec<ChangeRecord> {
        let mut records = Vec::with_capacity(lines.len());

        for line in lines {
            match Self::parse_line(line) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("{e}");
                    let path = normalize_path(line.trim());
                    if path.is_empty() {
                        continue;
                    }
                    records.push(ChangeRecord::new(MALFORMED_FLAG, MALFORMED_FLAG, path));
                }
            }
        }

        records
    }

    /// Parse one line; blank lines yield `Ok(None)`
    pub fn parse_line(line: &str) -> Result<Option<ChangeRecord>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut chars = line.chars();
        let (index, working, separator) = match (chars.next(), chars.next(), chars.next()) {
            (Some(index), Some(working), Some(separator)) => (index, working, separator),
            _ => return Err(PushyError::parse(line)),
        };
        if separator != ' ' {
            return Err(PushyError::parse(line));
        }

        let rest = chars.as_str();
        let (orig_path, path) = match rest.split_once(RENAME_SEPARATOR) {
            Some((orig, new)) => (Some(normalize_path(&unquote(orig))), normalize_path(&unquote(new))),
            None => (None, normalize_path(&unquote(rest))),
        };

        if path.is_empty() || orig_path.as_ref().is_some_and(|orig| orig.is_empty()) {
            return Err(PushyError::parse(line));
        }

        Ok(Some(ChangeRecord {
            working: StatusFlag::from_char(working),
            index: StatusFlag::from_char(index),
            path,
            orig_path,
        }))
    }
}

/// Restricts records to the tracked folders and to the selected status markers
#[derive(Debug, Clone)]
pub struct StatusFilter {
    folders: Vec<String>,
    select: Vec<StatusFlag>,
}

impl StatusFilter {
    pub fn new(folders: &[String], select: Vec<StatusFlag>) -> Self {
        let folders = folders
            .iter()
            .map(|folder| folder.trim_end_matches('/').to_string())
            .filter(|folder| !folder.is_empty())
            .collect();
        Self { folders, select }
    }

    pub fn from_config(config: &PushyConfig) -> Self {
        Self::new(&config.folders, config.selected_flags())
    }

    pub fn matches(&self, record: &ChangeRecord) -> bool {
        self.in_tracked_folder(record) && self.has_selected_flag(record)
    }

    pub fn apply(&self, records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }

    fn in_tracked_folder(&self, record: &ChangeRecord) -> bool {
        if self.folders.is_empty() {
            return true;
        }
        std::iter::once(&record.path)
            .chain(record.orig_path.iter())
            .any(|path| {
                self.folders.iter().any(|folder| {
                    path == folder
                        || path
                            .strip_prefix(folder.as_str())
                            .is_some_and(|rest| rest.starts_with('/'))
                })
            })
    }

    fn has_selected_flag(&self, record: &ChangeRecord) -> bool {
        [record.index, record.working]
            .iter()
            .any(|flag| flag.needs_attention() || self.select.contains(flag))
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Undo git's C-style quoting of a path; unquoted input is returned unchanged
fn unquote(raw: &str) -> String {
    let inner = match raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return raw.to_string(),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match iter.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'v') => bytes.push(0x0b),
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
