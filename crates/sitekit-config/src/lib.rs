//! Configuration management for SiteKit.
//!
//! Parses `sitekit.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `agent.endpoint`
//! - `agent.api_key`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use expand::expand_env;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitekit.toml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {message}")]
    EnvVar { field: String, message: String },
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site document path.
    pub site_path: Option<PathBuf>,
    /// Override business directory seed file path.
    pub directory_path: Option<PathBuf>,
    /// Override business slug.
    pub business: Option<String>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Site document configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Template vertical the sites are generated from.
    pub template: String,
    /// Business slug served by this instance.
    pub business: String,
    /// Path to the site document (JSON), relative to the config file.
    pub config_path: PathBuf,
    /// Path to the business directory seed file, relative to the config file.
    pub directory_path: PathBuf,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            template: "plumbing".to_owned(),
            business: String::new(),
            config_path: PathBuf::from("site.json"),
            directory_path: PathBuf::from("businesses.toml"),
        }
    }
}

/// Upstream agent service configuration.
///
/// When `endpoint` is empty the agent channel is disabled and turns fail
/// fast with a visible transcript error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Agent service endpoint URL. Supports env expansion.
    pub endpoint: String,
    /// Bearer token for the agent service. Supports env expansion.
    pub api_key: String,
}

/// Preview configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Reload debounce in milliseconds.
    pub debounce_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

/// Image upload configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Directory uploads are written to, relative to the config file.
    pub dir: PathBuf,
    /// URL prefix uploads are served under.
    pub base_url: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            base_url: "/uploads".to_owned(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site document configuration.
    pub site: SiteSettings,
    /// Agent service configuration.
    pub agent: AgentConfig,
    /// Preview configuration.
    pub preview: PreviewConfig,
    /// Upload configuration.
    pub uploads: UploadsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// When `path` is given that file is loaded; otherwise `sitekit.toml`
    /// is discovered by walking up from the current directory, falling
    /// back to defaults when none is found. CLI settings are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or when a
    /// required environment variable is unset.
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let discovered = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let mut config = match &discovered {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let mut config: Self = toml::from_str(&raw)?;
                config.config_path = Some(path.clone());
                config
            }
            None => Self::default(),
        };

        config.expand()?;
        config.resolve_paths();
        if let Some(cli) = cli {
            config.apply_cli(cli);
        }
        Ok(config)
    }

    /// Walk up from the current directory looking for `sitekit.toml`.
    fn discover() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    fn expand(&mut self) -> Result<(), ConfigError> {
        self.agent.endpoint = expand_env(&self.agent.endpoint, "agent.endpoint")?;
        self.agent.api_key = expand_env(&self.agent.api_key, "agent.api_key")?;
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self) {
        let Some(base) = self.config_path.as_ref().and_then(|p| p.parent()).map(Path::to_path_buf)
        else {
            return;
        };
        for path in [
            &mut self.site.config_path,
            &mut self.site.directory_path,
            &mut self.uploads.dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(site_path) = &cli.site_path {
            self.site.config_path = site_path.clone();
        }
        if let Some(directory_path) = &cli.directory_path {
            self.site.directory_path = directory_path.clone();
        }
        if let Some(business) = &cli.business {
            self.site.business = business.clone();
        }
    }
}
