use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Metadata for one downloaded filter list.
///
/// Written once the whole list has been imported and overwritten on every
/// refresh; never updated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDescriptor {
    pub name: String,
    pub uri: String,
    /// Lifetime in seconds of every membership entry imported from this list.
    pub ttl: u32,
    pub file_path: PathBuf,
    pub updated: DateTime<Utc>,
}

impl ListDescriptor {
    pub fn new(name: &str, uri: &str, ttl: u32, file_path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            uri: uri.to_string(),
            ttl,
            file_path,
            updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
    Pass,
    Restrict,
}

impl FilterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAction::Pass => "pass",
            FilterAction::Restrict => "restrict",
        }
    }

    pub fn is_restrict(&self) -> bool {
        matches!(self, FilterAction::Restrict)
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a filter list: `Unregistered → Downloading → Importing → Registered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListState {
    Unregistered,
    Downloading,
    Importing,
    Registered,
}

impl ListState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListState::Unregistered => "unregistered",
            ListState::Downloading => "downloading",
            ListState::Importing => "importing",
            ListState::Registered => "registered",
        }
    }
}

/// Canonical form used for query names and list entries: trimmed, lowercase,
/// no trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// List names end up in cache keys and file names, so only a safe charset is accepted.
pub fn is_valid_list_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
