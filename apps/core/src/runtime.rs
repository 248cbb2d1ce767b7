use std::path::PathBuf;

use crate::action_executor::known_app_keys;
use crate::config::{self, ConfigError};
use crate::contract::{DirectoryRow, ListResponse, OpenResponse};
use crate::core_service::{LauncherSession, ServiceError, SystemLauncher};
use crate::discovery::WorkspaceScanner;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Output(serde_json::Error),
    NoMatch(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Output(error) => write!(f, "output error: {error}"),
            Self::NoMatch(query) => write!(f, "no directory matches '{query}'"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<serde_json::Error> for RuntimeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub json: bool,
    pub open_first: bool,
    pub open_path: Option<String>,
    pub query: String,
    pub help: bool,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut query_parts: Vec<&str> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--json" => options.json = true,
            "--first" => options.open_first = true,
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a file path".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--open" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--open requires a directory path".to_string())?;
                options.open_path = Some(value.clone());
            }
            "--" => {
                query_parts.extend(iter.by_ref().map(String::as_str));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{flag}'. Run with --help for usage."));
            }
            word => query_parts.push(word),
        }
    }

    if options.open_first && options.open_path.is_some() {
        return Err("--first and --open cannot be combined".to_string());
    }

    options.query = query_parts.join(" ");
    Ok(options)
}

pub fn usage() -> String {
    let apps: Vec<&str> = known_app_keys().collect();
    format!(
        "usage: dirhop [--config <file>] [--json] [--first | --open <dir>] [query...]\n\
         \n\
         Lists workspace directories ranked by frecency, filtered by an optional fuzzy query.\n\
         \n\
         options:\n  \
           --config <file>  config file (default: {})\n  \
           --json           print results as JSON\n  \
           --first          open the top-ranked match\n  \
           --open <dir>     open a known directory by path\n  \
           -h, --help       show this help\n\
         \n\
         app_choice values: {}, custom",
        config::Config::default().config_path.display(),
        apps.join(", ")
    )
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    if options.help {
        println!("{}", usage());
        return Ok(());
    }

    if let Err(error) = crate::logging::init() {
        eprintln!("[dirhop] logging disabled: {error}");
    }

    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        eprintln!(
            "[dirhop] wrote default config to {}",
            config.config_path.display()
        );
    }
    crate::logging::info(&format!(
        "startup workspace={} max_depth={} app_choice={} store={}",
        config.workspace_path.display(),
        config.max_depth,
        config.app_choice,
        config.store_db_path.display(),
    ));

    let scanner = WorkspaceScanner::from_config(&config);
    let mut session = LauncherSession::new(config)?;
    if let Err(error) = session.initialize(&scanner) {
        match error {
            ServiceError::Store(ref store_error) => {
                crate::logging::error(&format!("failed to save directories: {store_error}"));
                eprintln!("[dirhop] failed to save directories: {store_error}");
            }
            other => return Err(other.into()),
        }
    }

    let target = match (&options.open_path, options.open_first) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(
            session
                .search(&options.query)
                .first()
                .map(|item| item.path.clone())
                .ok_or_else(|| RuntimeError::NoMatch(options.query.clone()))?,
        ),
        (None, false) => None,
    };

    match target {
        Some(path) => open_directory(&mut session, &path, options.json),
        None => {
            let rows = session.rows(&options.query);
            print_rows(&options.query, rows, options.json)
        }
    }
}

fn open_directory(
    session: &mut LauncherSession,
    path: &str,
    json: bool,
) -> Result<(), RuntimeError> {
    match session.open(path, &SystemLauncher) {
        Ok(response) => print_opened(&response, json),
        Err(error) => {
            crate::logging::error(&format!("failed to open {path}: {error}"));
            Err(error.into())
        }
    }
}

fn print_opened(response: &OpenResponse, json: bool) -> Result<(), RuntimeError> {
    if json {
        println!("{}", serde_json::to_string(response)?);
    } else {
        println!("Opened in {}: {}", response.app_name, response.name);
    }
    Ok(())
}

fn print_rows(query: &str, rows: Vec<DirectoryRow>, json: bool) -> Result<(), RuntimeError> {
    if json {
        let response = ListResponse {
            query: query.to_string(),
            results: rows,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    if rows.is_empty() && !query.trim().is_empty() {
        eprintln!("[dirhop] no matches for '{query}'");
    }
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &DirectoryRow) -> String {
    match &row.badge {
        Some(badge) => format!("{}\t{}\t{badge}", row.name, row.display_path),
        None => format!("{}\t{}", row.name, row.display_path),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_row, parse_cli_args, CliOptions};
    use crate::contract::DirectoryRow;
    use std::path::PathBuf;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_args_list_everything() {
        assert_eq!(parse_cli_args(&[]).unwrap(), CliOptions::default());
    }

    #[test]
    fn free_words_form_the_initial_query() {
        let options = parse_cli_args(&args(&["my", "proj", "--json"])).unwrap();
        assert_eq!(options.query, "my proj");
        assert!(options.json);
    }

    #[test]
    fn parses_config_and_open_values() {
        let options =
            parse_cli_args(&args(&["--config", "/tmp/d.toml", "--open", "/w/a"])).unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/d.toml")));
        assert_eq!(options.open_path.as_deref(), Some("/w/a"));
    }

    #[test]
    fn double_dash_ends_option_parsing() {
        let options = parse_cli_args(&args(&["--", "--json"])).unwrap();
        assert_eq!(options.query, "--json");
        assert!(!options.json);
    }

    #[test]
    fn rejects_missing_option_values() {
        assert!(parse_cli_args(&args(&["--config"])).is_err());
        assert!(parse_cli_args(&args(&["--open"])).is_err());
    }

    #[test]
    fn rejects_unknown_options_and_conflicts() {
        assert!(parse_cli_args(&args(&["--verbose"])).is_err());
        assert!(parse_cli_args(&args(&["--first", "--open", "/w/a"])).is_err());
    }

    #[test]
    fn row_format_includes_badge_only_when_present() {
        let mut row = DirectoryRow {
            name: "a".to_string(),
            path: "/w/a".to_string(),
            display_path: "~/a".to_string(),
            frecency: 1,
            badge: None,
        };
        assert_eq!(format_row(&row), "a\t~/a");

        row.badge = Some("×3".to_string());
        assert_eq!(format_row(&row), "a\t~/a\t×3");
    }
}
