//! Command-line and environment configuration for rlp-api
//!
//! clap merges command-line arguments with environment variables; the TOML
//! file and compiled defaults are layered underneath by
//! [`rlp_common::config`].

use clap::Parser;
use rlp_common::config::{
    load_toml_config, resolve_bind, DatabaseConfig, DatabaseOverrides,
};
use rlp_common::Result;
use std::path::{Path, PathBuf};

/// Directory for JSON log files when none is configured
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Database connection arguments, shared by every binary that opens the store
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Path to TOML config file (default: ~/.config/rlp/config.toml)
    #[arg(short, long, env = "RLP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Full database URL, overrides the individual connection settings
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "MYSQL_HOST")]
    pub db_host: Option<String>,

    /// Database name
    #[arg(long, env = "MYSQL_DATABASE")]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long, env = "MYSQL_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "MYSQL_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,
}

impl DatabaseArgs {
    fn overrides(&self) -> DatabaseOverrides {
        DatabaseOverrides {
            url: self.database_url.clone(),
            host: self.db_host.clone(),
            name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }

    /// Layer the config file and defaults under these arguments
    pub fn resolve(&self) -> Result<DatabaseConfig> {
        let file = load_toml_config(self.config.as_deref())?;
        DatabaseConfig::resolve(&self.overrides(), &file.database)
    }
}

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "rlp-api")]
#[command(about = "FF14 Recipe Level Predictor - recipe CRUD service")]
#[command(version)]
pub struct Args {
    /// HTTP bind address
    #[arg(long, env = "RLP_BIND")]
    pub bind: Option<String>,

    /// Directory for rolling JSON log files
    #[arg(long, env = "RLP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Fully resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub database: DatabaseConfig,
}

impl Args {
    /// Log directory; needed before the config file is read
    pub fn log_dir(&self) -> &Path {
        self.log_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIR))
    }

    /// Layer the config file and defaults under these arguments
    pub fn resolve(&self) -> Result<Settings> {
        let file = load_toml_config(self.database.config.as_deref())?;
        let database = DatabaseConfig::resolve(&self.database.overrides(), &file.database)?;
        let bind = resolve_bind(self.bind.as_deref(), &file.server);
        Ok(Settings { bind, database })
    }
}
