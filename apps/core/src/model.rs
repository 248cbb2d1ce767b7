use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One known directory and its usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    pub name: String,
    pub path: String,
    pub frecency: u32,
    /// Milliseconds since the unix epoch of the last successful open, 0 if never opened.
    pub last_accessed: u64,
}

impl DirectoryItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            frecency: 1,
            last_accessed: 0,
        }
    }

    /// A freshly scanned directory, named after its final path component.
    pub fn discovered(path: &str) -> Self {
        Self::new(&display_name(path), path)
    }

    pub fn with_usage(mut self, frecency: u32, last_accessed: u64) -> Self {
        self.frecency = frecency;
        self.last_accessed = last_accessed;
        self
    }

    pub fn record_open(&mut self, now_ms: u64) {
        self.frecency = self.frecency.saturating_add(1);
        self.last_accessed = now_ms;
    }
}

/// The persisted document: `{ "directories": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredData {
    #[serde(default)]
    pub directories: Vec<DirectoryItem>,
}

pub fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
