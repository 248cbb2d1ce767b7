use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::action_executor::{is_known_app, CUSTOM_APP_CHOICE, DEFAULT_APP_CHOICE};

pub const DEFAULT_MAX_DEPTH: u8 = 2;
pub const MAX_SCAN_DEPTH: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace_path: PathBuf,
    pub max_depth: u8,
    pub app_choice: String,
    pub custom_app_path: Option<String>,
    pub include_hidden: bool,
    pub store_db_path: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            workspace_path: home_dir().unwrap_or_else(std::env::temp_dir),
            max_depth: DEFAULT_MAX_DEPTH,
            app_choice: DEFAULT_APP_CHOICE.to_string(),
            custom_app_path: None,
            include_hidden: false,
            store_db_path: base.join("store.sqlite3"),
            config_path: base.join("config.toml"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Serialize(error) => write!(f, "serialize error: {error}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Per-user directory holding config, store and logs.
pub fn stable_app_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("dirhop");
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return PathBuf::from(xdg).join("dirhop");
        }
        if let Some(home) = home_dir() {
            return home.join(".config").join("dirhop");
        }
    }

    std::env::temp_dir().join("dirhop")
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Loads the config file at `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let mut config = match fs::read_to_string(&config_path) {
        Ok(raw) => toml::from_str::<Config>(&raw)?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(error) => return Err(ConfigError::Io(error)),
    };

    config.config_path = config_path;
    config.workspace_path = expand_home(&config.workspace_path);
    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config.config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = toml::to_string_pretty(config)?;
    fs::write(&config.config_path, raw)?;
    Ok(())
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.workspace_path.as_os_str().is_empty() {
        return Err("workspace_path is required".into());
    }

    if cfg.max_depth < 1 || cfg.max_depth > MAX_SCAN_DEPTH {
        return Err(format!("max_depth must be between 1 and {MAX_SCAN_DEPTH}"));
    }

    if cfg.app_choice == CUSTOM_APP_CHOICE {
        let custom = cfg.custom_app_path.as_deref().unwrap_or("").trim();
        if custom.is_empty() {
            return Err("custom_app_path is required when app_choice is \"custom\"".into());
        }
    } else if !is_known_app(&cfg.app_choice) {
        return Err(format!("unknown app_choice '{}'", cfg.app_choice));
    }

    if cfg.store_db_path.as_os_str().is_empty() {
        return Err("store_db_path is required".into());
    }

    Ok(())
}

fn expand_home(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = match raw {
        "~" => "",
        _ => match raw.strip_prefix("~/") {
            Some(rest) => rest,
            None => return path.to_path_buf(),
        },
    };
    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_home, home_dir};
    use std::path::Path;

    #[test]
    fn expands_leading_tilde_only() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~/code")), home.join("code"));
        assert_eq!(expand_home(Path::new("~")), home);
        assert_eq!(expand_home(Path::new("/w/~/x")), Path::new("/w/~/x"));
    }
}
