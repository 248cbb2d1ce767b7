use rusqlite::Connection;

use crate::action_executor::{launch_directory, resolve_app, AppConfig, LaunchError};
use crate::config::{validate, Config};
use crate::contract::{DirectoryRow, OpenResponse};
use crate::discovery::{DiscoveryProvider, ProviderError};
use crate::index_store::{self, StoreError};
use crate::model::{now_millis, DirectoryItem};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Store(StoreError),
    Launch(LaunchError),
    Provider(ProviderError),
    ItemNotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Store(error) => write!(f, "store error: {error}"),
            Self::Launch(error) => write!(f, "launch error: {error}"),
            Self::Provider(error) => write!(f, "provider error: {error}"),
            Self::ItemNotFound(path) => write!(f, "directory not found: {path}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<LaunchError> for ServiceError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

impl From<ProviderError> for ServiceError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Opens a directory in an external application.
pub trait AppLauncher {
    fn launch(&self, app: &AppConfig, directory: &str) -> Result<(), LaunchError>;
}

pub struct SystemLauncher;

impl AppLauncher for SystemLauncher {
    fn launch(&self, app: &AppConfig, directory: &str) -> Result<(), LaunchError> {
        launch_directory(app, directory)
    }
}

/// Per-invocation state: config, the store handle and the in-memory directory
/// collection. The collection is only ever replaced wholesale.
pub struct LauncherSession {
    config: Config,
    db: Connection,
    directories: Vec<DirectoryItem>,
}

impl LauncherSession {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let db = index_store::open_from_config(&config)?;
        Ok(Self {
            config,
            db,
            directories: Vec::new(),
        })
    }

    pub fn with_connection(config: Config, db: Connection) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self {
            config,
            db,
            directories: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn directories(&self) -> &[DirectoryItem] {
        &self.directories
    }

    /// Loads stored usage, merges a fresh scan into it and persists the result.
    ///
    /// The merged collection is kept in memory even when persisting fails, so
    /// the session stays usable; the write error is still returned.
    pub fn initialize(&mut self, provider: &dyn DiscoveryProvider) -> Result<usize, ServiceError> {
        let existing = index_store::load_directories(&self.db);
        let scanned = provider.discover()?;
        let merged = index_store::merge_directories(&existing, &scanned);

        crate::logging::info(&format!(
            "merged provider={} stored={} scanned={} merged={}",
            provider.provider_name(),
            existing.len(),
            scanned.len(),
            merged.len()
        ));

        let count = merged.len();
        self.directories = merged;
        index_store::persist_directories(&self.db, &self.directories)?;
        Ok(count)
    }

    pub fn search(&self, query: &str) -> Vec<DirectoryItem> {
        self.search_at(query, now_millis())
    }

    pub fn search_at(&self, query: &str, now_ms: u64) -> Vec<DirectoryItem> {
        crate::search::rank(&self.directories, query, now_ms)
    }

    pub fn rows(&self, query: &str) -> Vec<DirectoryRow> {
        self.search(query)
            .iter()
            .map(|item| DirectoryRow::from_item(item, &self.config.workspace_path))
            .collect()
    }

    pub fn resolved_app(&self) -> AppConfig {
        resolve_app(
            &self.config.app_choice,
            self.config.custom_app_path.as_deref(),
        )
    }

    pub fn open(
        &mut self,
        path: &str,
        launcher: &dyn AppLauncher,
    ) -> Result<OpenResponse, ServiceError> {
        self.open_at(path, launcher, now_millis())
    }

    /// Launches `path` and records the use.
    ///
    /// Usage is only updated, in memory and in storage, after both the launch
    /// and the write succeed.
    pub fn open_at(
        &mut self,
        path: &str,
        launcher: &dyn AppLauncher,
        now_ms: u64,
    ) -> Result<OpenResponse, ServiceError> {
        let index = self
            .directories
            .iter()
            .position(|item| item.path == path)
            .ok_or_else(|| ServiceError::ItemNotFound(path.to_string()))?;

        let app = self.resolved_app();
        launcher.launch(&app, path)?;

        let mut updated = self.directories.clone();
        updated[index].record_open(now_ms);
        index_store::persist_directories(&self.db, &updated)?;

        let item = &updated[index];
        crate::logging::info(&format!(
            "opened path={} app={} frecency={}",
            item.path, app.name, item.frecency
        ));
        let response = OpenResponse {
            app_name: app.name,
            name: item.name.clone(),
            path: item.path.clone(),
        };
        self.directories = updated;
        Ok(response)
    }
}
