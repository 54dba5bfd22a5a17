//! Directory entries that attributes hang off.
//!
//! The accessor engine never assumes which entry it is reading; callers hand it
//! an [`EntryRef`] and it is passed through to the store untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Server,
    /// The singleton global config entry.
    Config,
    Cos,
    Domain,
    Account,
}

impl EntryKind {
    pub const ALL: [EntryKind; 5] = [
        EntryKind::Server,
        EntryKind::Config,
        EntryKind::Cos,
        EntryKind::Domain,
        EntryKind::Account,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Server => "server",
            EntryKind::Config => "config",
            EntryKind::Cos => "cos",
            EntryKind::Domain => "domain",
            EntryKind::Account => "account",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown entry kind: {}", s))
    }
}

/// Identifies one entry in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryRef {
    pub kind: EntryKind,
    pub name: String,
}

impl EntryRef {
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn server(name: impl Into<String>) -> Self {
        Self::new(EntryKind::Server, name)
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}
