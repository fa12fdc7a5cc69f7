use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

/// Serve files and program output over a one-line protocol.
#[derive(Debug, Parser)]
#[command(name = "docserver", version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base directory for requests [default: current directory]
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Log each request in detail
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// YAML configuration file
    #[arg(short, long, env = "DOCSERVER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds the effective configuration: file, then environment, then flags.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut cfg = Config::load(self.config.as_deref())?;
        self.apply(&mut cfg);
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut Config) {
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(base) = &self.base {
            cfg.base_dir = Some(base.clone());
        }
        if self.verbose {
            cfg.verbose = true;
        }
    }
}
