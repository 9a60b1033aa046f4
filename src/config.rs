//! Configuration
//!
//! Command-line flags with environment fallbacks. A `.env` file in the working directory
//! is read first when present.

use std::{fs, io, path::PathBuf};

use clap::Args;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    storage::FileStore,
};

/// Errors turning configuration into runtime resources.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The data directory could not be created.
    #[error("cannot use data directory {path}: {source}")]
    DataDir {
        /// Configured directory
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, env = "SMARTSUPPLY_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "SMARTSUPPLY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Storefront settings.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart and order history
    #[arg(
        long,
        env = "SMARTSUPPLY_DATA_DIR",
        default_value = ".smartsupply",
        global = true
    )]
    pub data_dir: PathBuf,

    /// YAML catalog to load instead of the built-in sample
    #[arg(long, env = "SMARTSUPPLY_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Read a `.env` file into the process environment if one exists.
    pub fn load_dotenv() {
        // Missing .env is fine
        _ = dotenvy::dotenv();
    }

    /// Load the configured catalog, or the sample one.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the catalog file cannot be read or is invalid.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::sample()?,
        };

        Ok(catalog)
    }

    /// Open the data directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DataDir`] if the directory cannot be created.
    pub fn store(&self) -> Result<FileStore, ConfigError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| ConfigError::DataDir {
            path: self.data_dir.clone(),
            source,
        })?;

        Ok(FileStore::new(&self.data_dir))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: StorefrontConfig,
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().join("state");

        let cli = TestCli::try_parse_from([
            "smartsupply",
            "--data-dir",
            data_dir.to_str().ok_or("non-utf8 path")?,
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])?;

        assert_eq!(cli.config.data_dir, data_dir);
        assert_eq!(cli.config.logging.log_format, LogFormat::Json);
        assert_eq!(cli.config.logging.log_level, "debug");

        cli.config.store()?;

        assert!(data_dir.is_dir());

        Ok(())
    }

    #[test]
    fn sample_catalog_is_used_without_a_path() -> TestResult {
        let cli = TestCli::try_parse_from(["smartsupply", "--data-dir", "unused"])?;

        assert!(!cli.config.catalog()?.products().is_empty());

        Ok(())
    }
}
