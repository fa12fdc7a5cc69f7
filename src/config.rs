//! Server configuration.
//!
//! Values are layered: defaults, then an optional YAML file, then
//! `DOCSERVER_*` environment variables, then command-line flags (applied by
//! the binary). [`Config::resolve`] validates the result into [`Settings`].

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base directory does not exist: {0}")]
    MissingBaseDir(PathBuf),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub base_dir: Option<PathBuf>,
    pub verbose: bool,
    /// Stop the server when a response write fails for any reason other
    /// than the client going away.
    pub abort_on_write_error: bool,
    pub max_request_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_dir: None,
            verbose: false,
            abort_on_write_error: true,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}

impl Config {
    /// The YAML file if one is given (defaults otherwise), overridden by
    /// the `DOCSERVER_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match file {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(port) = std::env::var("DOCSERVER_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "DOCSERVER_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(base) = std::env::var_os("DOCSERVER_BASE") {
            self.base_dir = Some(PathBuf::from(base));
        }

        if let Ok(verbose) = std::env::var("DOCSERVER_VERBOSE") {
            self.verbose = match verbose.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: "DOCSERVER_VERBOSE",
                        value: verbose.clone(),
                    });
                }
            };
        }

        Ok(())
    }

    /// Validates the base directory and freezes the configuration.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let base_dir = match self.base_dir {
            Some(path) => BaseDirectory::new(path)?,
            None => BaseDirectory::current()?,
        };

        Ok(Settings {
            port: self.port,
            base_dir,
            verbose: self.verbose,
            abort_on_write_error: self.abort_on_write_error,
            max_request_size: self.max_request_size.max(1),
        })
    }
}

/// Root under which every request path is resolved.
///
/// Only constructed for directories that existed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectory(PathBuf);

impl BaseDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Err(ConfigError::MissingBaseDir(path));
        }
        Ok(Self(path))
    }

    pub fn current() -> Result<Self, ConfigError> {
        std::env::current_dir()
            .map(Self)
            .map_err(ConfigError::CurrentDir)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn as_os_str(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl fmt::Display for BaseDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Validated, read-only server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub base_dir: BaseDirectory,
    pub verbose: bool,
    pub abort_on_write_error: bool,
    pub max_request_size: usize,
}

impl Settings {
    pub fn new(port: u16, base_dir: BaseDirectory) -> Self {
        Self {
            port,
            base_dir,
            verbose: false,
            abort_on_write_error: true,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}
