use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const CUSTOM_APP_CHOICE: &str = "custom";
pub const DEFAULT_APP_CHOICE: &str = "vscode";
/// Table entry used when a choice is not in the table.
pub const FALLBACK_APP_CHOICE: &str = "antigravity";
pub const CUSTOM_APP_NAME: &str = "Custom App";
pub const BUNDLE_EXTENSION: &str = ".app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// Run the command with the directory as its only argument.
    Direct,
    /// Ask the OS to open an application bundle with the directory.
    BundleOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub name: String,
    pub command: String,
    pub strategy: LaunchStrategy,
}

struct KnownApp {
    key: &'static str,
    name: &'static str,
    command: &'static str,
    strategy: LaunchStrategy,
}

static APP_CONFIGS: [KnownApp; 8] = [
    KnownApp {
        key: "antigravity",
        name: "Antigravity",
        command: "antigravity",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "vscode",
        name: "VS Code",
        command: "code",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "cursor",
        name: "Cursor",
        command: "cursor",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "zed",
        name: "Zed",
        command: "zed",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "webstorm",
        name: "WebStorm",
        command: "webstorm",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "idea",
        name: "IntelliJ IDEA",
        command: "idea",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "sublime",
        name: "Sublime Text",
        command: "subl",
        strategy: LaunchStrategy::Direct,
    },
    KnownApp {
        key: "opencode",
        name: "OpenCode",
        command: "OpenCode",
        strategy: LaunchStrategy::BundleOpen,
    },
];

impl KnownApp {
    fn to_config(&self) -> AppConfig {
        AppConfig {
            name: self.name.to_string(),
            command: self.command.to_string(),
            strategy: self.strategy,
        }
    }
}

pub fn known_app_keys() -> impl Iterator<Item = &'static str> {
    APP_CONFIGS.iter().map(|app| app.key)
}

pub fn is_known_app(choice: &str) -> bool {
    APP_CONFIGS.iter().any(|app| app.key == choice)
}

/// Resolves the configured choice to launch parameters.
///
/// `"custom"` builds an ad hoc entry from `custom_path`; unknown choices fall
/// back to [`FALLBACK_APP_CHOICE`].
pub fn resolve_app(choice: &str, custom_path: Option<&str>) -> AppConfig {
    if choice == CUSTOM_APP_CHOICE {
        let path = custom_path.unwrap_or("").trim();
        let strategy = if path.ends_with(BUNDLE_EXTENSION) {
            LaunchStrategy::BundleOpen
        } else {
            LaunchStrategy::Direct
        };
        return AppConfig {
            name: CUSTOM_APP_NAME.to_string(),
            command: path.to_string(),
            strategy,
        };
    }

    APP_CONFIGS
        .iter()
        .find(|app| app.key == choice)
        .or_else(|| APP_CONFIGS.iter().find(|app| app.key == FALLBACK_APP_CHOICE))
        .map(KnownApp::to_config)
        .unwrap_or_else(|| APP_CONFIGS[0].to_config())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    EmptyPath,
    MissingPath(PathBuf),
    LaunchFailed { message: String, code: Option<i32> },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "empty path"),
            Self::MissingPath(path) => write!(f, "path does not exist: {}", path.display()),
            Self::LaunchFailed {
                message,
                code: Some(code),
            } => write!(f, "launch failed (exit code {code}): {message}"),
            Self::LaunchFailed {
                message,
                code: None,
            } => write!(f, "launch failed: {message}"),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Program and argv for opening `directory` with `app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    pub program: String,
    pub args: Vec<String>,
}

pub fn invocation_plan(app: &AppConfig, directory: &str) -> InvocationPlan {
    match app.strategy {
        LaunchStrategy::BundleOpen => InvocationPlan {
            program: "open".to_string(),
            args: vec!["-a".to_string(), app.command.clone(), directory.to_string()],
        },
        LaunchStrategy::Direct => direct_plan(&app.command, directory),
    }
}

#[cfg(target_os = "windows")]
fn direct_plan(command: &str, directory: &str) -> InvocationPlan {
    // Editor CLIs ship as .cmd shims that only resolve through cmd.
    InvocationPlan {
        program: "cmd".to_string(),
        args: vec![
            "/C".to_string(),
            command.to_string(),
            directory.to_string(),
        ],
    }
}

#[cfg(not(target_os = "windows"))]
fn direct_plan(command: &str, directory: &str) -> InvocationPlan {
    InvocationPlan {
        program: command.to_string(),
        args: vec![directory.to_string()],
    }
}

/// Opens `directory` with `app` and waits for the launcher process to exit.
pub fn launch_directory(app: &AppConfig, directory: &str) -> Result<(), LaunchError> {
    let trimmed = directory.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    let candidate = Path::new(trimmed);
    if !candidate.is_dir() {
        return Err(LaunchError::MissingPath(candidate.to_path_buf()));
    }

    if app.command.trim().is_empty() {
        return Err(LaunchError::LaunchFailed {
            message: format!("no command configured for {}", app.name),
            code: None,
        });
    }

    let plan = invocation_plan(app, trimmed);
    let output = Command::new(&plan.program)
        .args(&plan.args)
        .output()
        .map_err(|error| LaunchError::LaunchFailed {
            message: format!("failed to start '{}': {error}", plan.program),
            code: None,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let message = if stderr.is_empty() {
        format!("'{}' exited with status {}", plan.program, output.status)
    } else {
        stderr
    };
    Err(LaunchError::LaunchFailed {
        message,
        code: output.status.code(),
    })
}
