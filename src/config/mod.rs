//! Configuration module for path_translator.
//!
//! This module provides centralized configuration loading from environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use path_translator::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Document root: {}", config.translator.document_root);
//! println!("Executor: {:?}", config.executor.executor_type);
//! ```

mod error;
mod executor;
mod logging;
pub(crate) mod parse;
mod translator;

pub use error::ConfigError;
pub use executor::{ExecutorConfig, ExecutorType};
pub use logging::{LogFormat, LoggingConfig};
pub use translator::TranslatorConfig;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path translator configuration.
    pub translator: TranslatorConfig,
    /// Executor configuration.
    pub executor: ExecutorConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            translator: TranslatorConfig::from_env()?,
            executor: ExecutorConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Document root: {}", self.translator.document_root);
        info!(
            "  Parameter directory: {}",
            self.translator.parameter_directory_name
        );
        info!("  Search extensions: {}", self.translator.search_extensions);

        if self.translator.decode_segments {
            info!("  Segment decoding: enabled");
        }

        info!("  Executor: {:?}", self.executor.executor_type);

        if self.executor.executor_type == ExecutorType::Cgi {
            info!("  Interpreter: {}", self.executor.interpreter);
            match self.executor.timeout {
                Some(timeout) => info!("  Execute timeout: {}s", timeout.as_secs()),
                None => info!("  Execute timeout: disabled"),
            }
        }
    }
}
