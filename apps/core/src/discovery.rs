use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

/// Source of candidate directory paths fed into the store merge.
pub trait DiscoveryProvider {
    fn provider_name(&self) -> &'static str;
    fn discover(&self) -> Result<Vec<String>, ProviderError>;
}

pub struct WorkspaceScanner {
    base: PathBuf,
    max_depth: usize,
    include_hidden: bool,
}

impl WorkspaceScanner {
    pub fn new(base: impl Into<PathBuf>, max_depth: usize, include_hidden: bool) -> Self {
        Self {
            base: base.into(),
            max_depth,
            include_hidden,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.workspace_path.clone(),
            config.max_depth as usize,
            config.include_hidden,
        )
    }
}

impl DiscoveryProvider for WorkspaceScanner {
    fn provider_name(&self) -> &'static str {
        "workspace"
    }

    /// Fails only when the workspace root itself is not a directory; problems
    /// below the root are skipped by the walk.
    fn discover(&self) -> Result<Vec<String>, ProviderError> {
        if !self.base.is_dir() {
            return Err(ProviderError::new(format!(
                "workspace is not a directory: {}",
                self.base.display()
            )));
        }

        let paths = scan_directories(&self.base, self.max_depth, self.include_hidden)
            .into_iter()
            .filter_map(|path| match path.into_os_string().into_string() {
                Ok(path) => Some(path),
                Err(raw) => {
                    crate::logging::warn(&format!(
                        "skipping non-utf8 directory path {}",
                        Path::new(&raw).display()
                    ));
                    None
                }
            })
            .collect();
        Ok(paths)
    }
}

/// Fixed path list, used where a real walk is not wanted.
pub struct StaticProvider {
    paths: Vec<String>,
}

impl StaticProvider {
    pub fn from_paths(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

impl DiscoveryProvider for StaticProvider {
    fn provider_name(&self) -> &'static str {
        "static"
    }

    fn discover(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.paths.clone())
    }
}

/// Collects every directory below `base` up to `max_depth` levels deep.
///
/// The base's immediate children are depth 1. Directories at `max_depth` are
/// reported but not read. Unreadable subtrees are skipped and the rest of the
/// walk continues.
pub fn scan_directories(base: &Path, max_depth: usize, include_hidden: bool) -> Vec<PathBuf> {
    if max_depth == 0 {
        return Vec::new();
    }

    WalkDir::new(base)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || is_visible_dir(entry, include_hidden))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(error) => {
                crate::logging::warn(&format!("scan skipped subtree: {error}"));
                None
            }
        })
        .collect()
}

fn is_visible_dir(entry: &DirEntry, include_hidden: bool) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    include_hidden || !entry.file_name().to_string_lossy().starts_with('.')
}
