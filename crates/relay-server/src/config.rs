//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracker_core::ProjectRef;

/// How a payload is split into upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One upsert per alert in the payload.
    Alert,
    /// One upsert per payload, rendered from the common labels.
    Payload,
}

impl FromStr for Grouping {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "alert" => Ok(Grouping::Alert),
            "payload" => Ok(Grouping::Payload),
            _ => Err(ConfigError::InvalidGrouping(value.to_string())),
        }
    }
}

/// Relay configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// GitLab API base URL.
    pub gitlab_api_url: String,
    /// GitLab private token.
    pub gitlab_token: String,
    /// Project used when an alert does not carry the project label.
    pub default_project: Option<ProjectRef>,
    /// Comment on an already-open issue instead of leaving it untouched.
    pub comment_on_existing: bool,
    /// Per-alert or per-payload issues.
    pub grouping: Grouping,
    /// Label naming the target project of an alert.
    pub project_label: String,
    /// Directory holding `title.tmpl`, `description.tmpl` and `comment.tmpl`.
    pub template_dir: PathBuf,
    /// Timeout for each GitLab request.
    pub request_timeout: Duration,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GITLAB_TOKEN` | GitLab private token | (required) |
    /// | `GITLAB_API_URL` | GitLab API base URL | (required) |
    /// | `GITLAB_PROJECT_ID` | Default project id or path | none |
    /// | `COMMENT_ON_EXISTING` | Comment on open duplicates | `false` |
    /// | `ISSUE_GROUPING` | `alert` or `payload` | `alert` |
    /// | `PROJECT_LABEL` | Label used for project routing | `project_path` |
    /// | `TEMPLATE_DIR` | Template directory | `templates` |
    /// | `RELAY_ADDR` | Server bind address | `0.0.0.0:8080` |
    /// | `GITLAB_TIMEOUT_SECS` | Request timeout in seconds | `5` |
    /// | `LOG_LEVEL` | Log filter when `RUST_LOG` is unset | `info` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let gitlab_token = var("GITLAB_TOKEN").ok_or(ConfigError::MissingToken)?;
        let gitlab_api_url = var("GITLAB_API_URL").ok_or(ConfigError::MissingApiUrl)?;

        let default_project = var("GITLAB_PROJECT_ID").and_then(|v| ProjectRef::parse(&v));

        let comment_on_existing = match var("COMMENT_ON_EXISTING") {
            Some(value) => parse_bool("COMMENT_ON_EXISTING", &value)?,
            None => false,
        };

        let grouping = match var("ISSUE_GROUPING") {
            Some(value) => value.parse()?,
            None => Grouping::Alert,
        };

        let project_label =
            var("PROJECT_LABEL").unwrap_or_else(|| "project_path".to_string());

        let template_dir = PathBuf::from(var("TEMPLATE_DIR").unwrap_or_else(|| "templates".to_string()));

        let addr = var("RELAY_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let request_timeout = match var("GITLAB_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout(value))?,
            None => Duration::from_secs(5),
        };

        let log_level = match var("LOG_LEVEL") {
            Some(value) => parse_log_level(&value)?,
            None => "info".to_string(),
        };

        Ok(Self {
            addr,
            gitlab_api_url,
            gitlab_token,
            default_project,
            comment_on_existing,
            grouping,
            project_label,
            template_dir,
            request_timeout,
            log_level,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("gitlab_api_url", &self.gitlab_api_url)
            .field("gitlab_token", &"<redacted>")
            .field("default_project", &self.default_project)
            .field("comment_on_existing", &self.comment_on_existing)
            .field("grouping", &self.grouping)
            .field("project_label", &self.project_label)
            .field("template_dir", &self.template_dir)
            .field("request_timeout", &self.request_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

/// Accept a bare level (`debug`, `WARN`) or a full filter directive list
/// (`info,relay_server=debug`).
fn parse_log_level(value: &str) -> Result<String, ConfigError> {
    let valid = if value.contains('=') || value.contains(',') {
        EnvFilter::try_new(value).is_ok()
    } else {
        value.parse::<LevelFilter>().is_ok()
    };
    if valid {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidLogLevel(value.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GITLAB_TOKEN environment variable is required")]
    MissingToken,

    #[error("GITLAB_API_URL environment variable is required")]
    MissingApiUrl,

    #[error("Invalid RELAY_ADDR format")]
    InvalidAddr,

    #[error("Invalid ISSUE_GROUPING '{0}' (expected 'alert' or 'payload')")]
    InvalidGrouping(String),

    #[error("Invalid GITLAB_TIMEOUT_SECS '{0}'")]
    InvalidTimeout(String),

    #[error("Invalid LOG_LEVEL '{0}'")]
    InvalidLogLevel(String),

    #[error("Invalid boolean for {var}: '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("GITLAB_TOKEN", "glpat-xxxx"),
        ("GITLAB_API_URL", "https://gitlab.example.com/api/v4"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
        assert!(config.default_project.is_none());
        assert!(!config.comment_on_existing);
        assert_eq!(config.grouping, Grouping::Alert);
        assert_eq!(config.project_label, "project_path");
        assert_eq!(config.template_dir, PathBuf::from("templates"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_token() {
        let err = load(&[("GITLAB_API_URL", "https://gitlab.example.com/api/v4")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let err = load(&[("GITLAB_TOKEN", "t"), ("GITLAB_API_URL", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiUrl));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("GITLAB_PROJECT_ID", "ops/alerts"),
            ("COMMENT_ON_EXISTING", "TRUE"),
            ("ISSUE_GROUPING", "payload"),
            ("PROJECT_LABEL", "gitlab_project"),
            ("RELAY_ADDR", "127.0.0.1:9000"),
            ("GITLAB_TIMEOUT_SECS", "12"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.default_project.unwrap().as_str(), "ops/alerts");
        assert!(config.comment_on_existing);
        assert_eq!(config.grouping, Grouping::Payload);
        assert_eq!(config.project_label, "gitlab_project");
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("COMMENT_ON_EXISTING", "maybe"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidBool { .. })));

        let mut vars = REQUIRED.to_vec();
        vars.push(("ISSUE_GROUPING", "team"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidGrouping(_))));

        let mut vars = REQUIRED.to_vec();
        vars.push(("GITLAB_TIMEOUT_SECS", "0"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidTimeout(_))));

        let mut vars = REQUIRED.to_vec();
        vars.push(("RELAY_ADDR", "not-an-addr"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidAddr)));
    }

    #[test]
    fn test_log_level_validation() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("LOG_LEVEL", "verbose"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidLogLevel(_))));

        let mut vars = REQUIRED.to_vec();
        vars.push(("LOG_LEVEL", "info,relay_server=bogus"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidLogLevel(_))));

        let mut vars = REQUIRED.to_vec();
        vars.push(("LOG_LEVEL", "DEBUG"));
        assert_eq!(load(&vars).unwrap().log_level, "DEBUG");

        let mut vars = REQUIRED.to_vec();
        vars.push(("LOG_LEVEL", "info,relay_server=debug"));
        assert_eq!(load(&vars).unwrap().log_level, "info,relay_server=debug");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = load(&REQUIRED).unwrap();
        assert!(!format!("{:?}", config).contains("glpat-xxxx"));
    }
}
