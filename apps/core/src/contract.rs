use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::DirectoryItem;

/// One list row handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryRow {
    pub name: String,
    pub path: String,
    pub display_path: String,
    pub frecency: u32,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListResponse {
    pub query: String,
    pub results: Vec<DirectoryRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenResponse {
    pub app_name: String,
    pub name: String,
    pub path: String,
}

impl DirectoryRow {
    pub fn from_item(item: &DirectoryItem, workspace: &Path) -> Self {
        Self {
            name: item.name.clone(),
            path: item.path.clone(),
            display_path: display_path(&item.path, workspace),
            frecency: item.frecency,
            badge: frecency_badge(item.frecency),
        }
    }
}

/// Replaces the first occurrence of the workspace root with `~`.
pub fn display_path(path: &str, workspace: &Path) -> String {
    let root = workspace.to_string_lossy();
    if root.is_empty() {
        return path.to_string();
    }
    path.replacen(root.as_ref(), "~", 1)
}

pub fn frecency_badge(frecency: u32) -> Option<String> {
    (frecency > 1).then(|| format!("×{frecency}"))
}
