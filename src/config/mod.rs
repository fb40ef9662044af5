//! Configuration resolution.
//!
//! CLI arguments come first; an optional TOML config file overrides them
//! field by field. Everything collapses into a single `AppConfig` the rest
//! of the server consumes.

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI arguments that participate in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_dir: Option<PathBuf>,
    pub user_db: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

/// Optional TOML file config; every field overrides its CLI counterpart.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub catalog_dir: Option<String>,
    pub user_db: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_dir: PathBuf,
    pub user_db: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_dir = file
            .catalog_dir
            .map(PathBuf::from)
            .or_else(|| cli.catalog_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("catalog_dir must be specified via CLI or in config file")
            })?;

        if !catalog_dir.exists() {
            bail!("Catalog directory does not exist: {:?}", catalog_dir);
        }
        if !catalog_dir.is_dir() {
            bail!("catalog_dir is not a directory: {:?}", catalog_dir);
        }

        let user_db = file
            .user_db
            .map(PathBuf::from)
            .or_else(|| cli.user_db.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("user_db must be specified via CLI or in config file")
            })?;

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        Ok(AppConfig {
            catalog_dir,
            user_db,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_catalog(dir: &Path) -> CliConfig {
        CliConfig {
            catalog_dir: Some(dir.to_path_buf()),
            user_db: Some(dir.join("users.db")),
            port: 3000,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            frontend_dir_path: None,
        }
    }

    #[test]
    fn cli_only_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_catalog(dir.path());
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_dir, dir.path());
    }

    #[test]
    fn file_values_override_cli() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_catalog(dir.path());
        let file: FileConfig = toml::from_str(
            r#"
            port = 8080
            logging_level = "headers"
            "#,
        )
        .unwrap();
        let config = AppConfig::resolve(&cli, Some(file)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(config.metrics_port, 9091);
    }

    #[test]
    fn missing_catalog_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut cli = cli_with_catalog(dir.path());
        cli.catalog_dir = Some(dir.path().join("nope"));
        assert!(AppConfig::resolve(&cli, None).is_err());
    }
}
