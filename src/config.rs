use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::model::task_kind::{TaskCatalog, TaskKind};
use crate::tracker::fields::FieldMap;
use crate::tracker::jira::JiraSettings;
use crate::triage::poll::PollPolicy;
use crate::triage::TriageOptions;

pub const TOKEN_VAR: &str = "JIRA_API_TOKEN";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub defaults: DefaultsConfig,
    pub fields: FieldMap,
    pub task_kinds: Vec<TaskKind>,
    pub poll: PollConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub url: String,
    pub project: String,
    /// Switches to Basic auth with `email:token`.
    pub email: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: "https://issues.redhat.com".into(),
            project: "RHEL".into(),
            email: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub board: Option<u64>,
    pub assignee: Option<String>,
    pub email_domain: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            board: None,
            assignee: None,
            email_domain: "redhat.com".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub attempts: u32,
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            attempts: policy.attempts,
            interval_secs: policy.interval.as_secs(),
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sprinter")
        .join("config.toml")
}

/// Load the config file. An explicit path must exist; the default one may not.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

pub fn api_token() -> Result<String> {
    token_from(std::env::var(TOKEN_VAR).ok())
}

fn token_from(value: Option<String>) -> Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(Error::Configuration(format!(
            "{TOKEN_VAR} is not set; export a personal access token to talk to Jira"
        ))),
    }
}

/// Login name of the current user, used to derive the default assignee.
pub fn login() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|l| !l.is_empty())
}

fn derive_assignee(login: Option<String>, email_domain: &str) -> Option<String> {
    login.map(|login| format!("{login}@{email_domain}"))
}

/// Everything a run needs, after flags, environment and config file are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub board: u64,
    pub assignee: Option<String>,
    pub color: bool,
    pub dry_run: bool,
    pub backlog: bool,
    pub catalog: TaskCatalog,
    pub poll: PollPolicy,
    pub jira: JiraSettings,
}

impl Settings {
    pub fn resolve(args: &Args, config: AppConfig, login: Option<String>) -> Result<Settings> {
        let board = args.board.or(config.defaults.board).ok_or_else(|| {
            Error::Configuration(
                "no board given; pass --board, set SPRINTER_BOARD or [defaults] board".into(),
            )
        })?;
        let assignee = args
            .assignee
            .clone()
            .or(config.defaults.assignee)
            .or_else(|| derive_assignee(login, &config.defaults.email_domain));

        let catalog = if config.task_kinds.is_empty() {
            TaskCatalog::default()
        } else {
            TaskCatalog::new(config.task_kinds)
        };
        if config.poll.attempts == 0 {
            return Err(Error::Configuration("[poll] attempts must be at least 1".into()));
        }
        let poll = PollPolicy {
            attempts: config.poll.attempts,
            interval: Duration::from_secs(config.poll.interval_secs),
        };

        let jira = JiraSettings {
            base_url: config.jira.url,
            project: config.jira.project,
            email: config.jira.email,
            fields: config.fields,
            split_kinds: catalog.default_names(),
            dry_run: args.dry,
        };

        Ok(Settings {
            board,
            assignee,
            color: !args.nocolor,
            dry_run: args.dry,
            backlog: args.backlog,
            catalog,
            poll,
            jira,
        })
    }

    pub fn triage_options(&self) -> TriageOptions {
        TriageOptions {
            board_id: self.board,
            assignee: self.assignee.clone(),
            backlog: self.backlog,
            poll: self.poll,
        }
    }
}
