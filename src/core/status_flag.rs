//! Type-safe porcelain status markers.
//!
//! Each `git status --porcelain` line carries two one-character markers: the
//! index (staged) state and the working-tree state. [`StatusFlag`] turns those
//! characters into an enumeration so the rest of the core can match on states
//! instead of comparing characters.
//!
//! Conversion from `char` is total: characters git may add in the future are
//! kept as [`StatusFlag::Unknown`] and written back unchanged, so nothing is
//! lost across the JSON boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One porcelain status marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFlag {
    /// No change in this area (' ')
    #[default]
    Unmodified,
    /// Modified (M)
    Modified,
    /// Type changed, e.g. file to symlink (T)
    TypeChanged,
    /// Added (A)
    Added,
    /// Deleted (D)
    Deleted,
    /// Renamed (R)
    Renamed,
    /// Copied (C)
    Copied,
    /// Updated but unmerged (U)
    Unmerged,
    /// Untracked (?)
    Untracked,
    /// Ignored (!)
    Ignored,
    /// Any marker this version does not know about
    Unknown(char),
}

impl StatusFlag {
    /// Convert a porcelain marker character
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => StatusFlag::Unmodified,
            'M' => StatusFlag::Modified,
            'T' => StatusFlag::TypeChanged,
            'A' => StatusFlag::Added,
            'D' => StatusFlag::Deleted,
            'R' => StatusFlag::Renamed,
            'C' => StatusFlag::Copied,
            'U' => StatusFlag::Unmerged,
            '?' => StatusFlag::Untracked,
            '!' => StatusFlag::Ignored,
            other => StatusFlag::Unknown(other),
        }
    }

    /// The marker character git prints for this state
    pub fn as_char(&self) -> char {
        match self {
            StatusFlag::Unmodified => ' ',
            StatusFlag::Modified => 'M',
            StatusFlag::TypeChanged => 'T',
            StatusFlag::Added => 'A',
            StatusFlag::Deleted => 'D',
            StatusFlag::Renamed => 'R',
            StatusFlag::Copied => 'C',
            StatusFlag::Unmerged => 'U',
            StatusFlag::Untracked => '?',
            StatusFlag::Ignored => '!',
            StatusFlag::Unknown(c) => *c,
        }
    }

    /// Human-readable label used in listings
    pub fn description(&self) -> &'static str {
        match self {
            StatusFlag::Unmodified => "Unmodified",
            StatusFlag::Modified => "Modified",
            StatusFlag::TypeChanged => "Type changed",
            StatusFlag::Added => "Added",
            StatusFlag::Deleted => "Deleted",
            StatusFlag::Renamed => "Renamed",
            StatusFlag::Copied => "Copied",
            StatusFlag::Unmerged => "Unmerged",
            StatusFlag::Untracked => "New file",
            StatusFlag::Ignored => "Ignored",
            StatusFlag::Unknown(_) => "Changed",
        }
    }

    /// States that must never be filtered away because the user has to see them
    pub fn needs_attention(&self) -> bool {
        matches!(self, StatusFlag::Unmerged | StatusFlag::Unknown(_))
    }

    /// Parse a selection string such as `"MTDRC?A"` into flags
    pub fn parse_selection(select: &str) -> Vec<StatusFlag> {
        select.chars().map(StatusFlag::from_char).collect()
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<char> for StatusFlag {
    fn from(c: char) -> Self {
        StatusFlag::from_char(c)
    }
}

impl Serialize for StatusFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.as_char().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for StatusFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(StatusFlag::from_char(c)),
            // An empty marker comes from clients that trimmed the space away
            (None, _) => Ok(StatusFlag::Unmodified),
            _ => Err(serde::de::Error::custom(format!(
                "status flag must be a single character, got '{raw}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_conversion_is_lossless() {
        for c in [' ', 'M', 'T', 'A', 'D', 'R', 'C', 'U', '?', '!', 'X', 'z'] {
            assert_eq!(StatusFlag::from_char(c).as_char(), c);
        }
    }

    #[test]
    fn test_unknown_flags_are_kept() {
        assert_eq!(StatusFlag::from('X'), StatusFlag::Unknown('X'));
        assert!(StatusFlag::Unknown('X').needs_attention());
        assert!(StatusFlag::Unmerged.needs_attention());
        assert!(!StatusFlag::Modified.needs_attention());
    }

    #[test]
    fn test_parse_selection() {
        let flags = StatusFlag::parse_selection("MTDRC?A");
        assert_eq!(
            flags,
            vec![
                StatusFlag::Modified,
                StatusFlag::TypeChanged,
                StatusFlag::Deleted,
                StatusFlag::Renamed,
                StatusFlag::Copied,
                StatusFlag::Untracked,
                StatusFlag::Added,
            ]
        );
    }

    #[test]
    fn test_serialize_as_single_char_string() {
        assert_eq!(serde_json::to_string(&StatusFlag::Renamed).unwrap(), "\"R\"");
        assert_eq!(serde_json::to_string(&StatusFlag::Unmodified).unwrap(), "\" \"");
    }

    #[test]
    fn test_deserialize() {
        let flag: StatusFlag = serde_json::from_str("\"D\"").unwrap();
        assert_eq!(flag, StatusFlag::Deleted);

        let flag: StatusFlag = serde_json::from_str("\"\"").unwrap();
        assert_eq!(flag, StatusFlag::Unmodified);

        assert!(serde_json::from_str::<StatusFlag>("\"MM\"").is_err());
    }

    #[test]
    fn test_description() {
        assert_eq!(StatusFlag::Added.description(), "Added");
        assert_eq!(StatusFlag::Untracked.description(), "New file");
        assert_eq!(StatusFlag::Unknown('X').description(), "Changed");
    }
}
