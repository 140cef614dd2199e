//! Client configuration with environment and file fallbacks.
//!
//! Values resolve in precedence order: explicit builder calls, then
//! environment variables, then a `rill.toml` file, then defaults.
//!
//! Example configuration:
//! ```toml
//! token = "${MY_RILL_TOKEN}"
//! org = "demo"
//! project = "my-project"
//! api_base_url = "https://api.rilldata.com/v1/"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Hosted API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.rilldata.com/v1/";

/// Bearer token for API requests.
pub const ENV_TOKEN: &str = "RILL_USER_TOKEN";
/// Default organization name.
pub const ENV_ORG: &str = "RILL_DEFAULT_ORG";
/// Default project name.
pub const ENV_PROJECT: &str = "RILL_DEFAULT_PROJECT";
/// Explicit config file path, checked before the default locations.
pub const ENV_CONFIG: &str = "RILL_CONFIG";

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct RillConfig {
    /// Bearer token. Requests fail without one.
    pub api_token: Option<String>,

    /// Base URL for the admin API.
    pub api_base_url: String,

    /// Org used when an operation does not name one.
    pub default_org: Option<String>,

    /// Project used when an operation does not name one.
    pub default_project: Option<String>,
}

impl Default for RillConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_org: None,
            default_project: None,
        }
    }
}

/// On-disk shape of `rill.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    token: Option<String>,
    org: Option<String>,
    project: Option<String>,
    api_base_url: Option<String>,
}

impl RillConfig {
    /// Load configuration from the environment and the default file
    /// locations. Environment variables win over file values.
    ///
    /// The file is searched in order:
    /// 1. The path in `RILL_CONFIG`
    /// 2. `./rill.toml`
    /// 3. `~/.config/rill/rill.toml`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(token) = non_empty_env(ENV_TOKEN) {
            config.api_token = Some(token);
        }
        if let Some(org) = non_empty_env(ENV_ORG) {
            config.default_org = Some(org);
        }
        if let Some(project) = non_empty_env(ENV_PROJECT) {
            config.default_project = Some(project);
        }

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;

        let mut config = Self::default();
        if let Some(token) = file.token {
            config.api_token = Some(expand_env_vars(&token)?);
        }
        config.default_org = file.org;
        config.default_project = file.project;
        if let Some(base) = file.api_base_url {
            config.api_base_url = base;
        }
        Ok(config)
    }

    /// Whether both default org and project are set.
    pub fn has_defaults(&self) -> bool {
        self.default_org.is_some() && self.default_project.is_some()
    }

    fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = non_empty_env(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from("rill.toml");
        if local.exists() {
            return Some(local);
        }

        let user = dirs::config_dir()?.join("rill").join("rill.toml");
        if user.exists() {
            return Some(user);
        }

        None
    }
}

/// Expand `${VAR}` references against the process environment.
///
/// A referenced variable that is unset is an error, so a missing
/// secret fails loudly instead of becoming a literal token.
pub fn expand_env_vars(value: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut last = 0;

    for caps in ENV_VAR_PATTERN.captures_iter(value) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let expanded = env::var(name.as_str())
            .map_err(|_| ConfigError::MissingEnvVar(name.as_str().to_string()))?;
        result.push_str(&value[last..whole.start()]);
        result.push_str(&expanded);
        last = whole.end();
    }

    result.push_str(&value[last..]);
    Ok(result)
}

/// Env vars set to the empty string count as unset.
fn non_empty_env(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
