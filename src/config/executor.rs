//! Executor configuration.

use std::time::Duration;

use super::parse::{env_duration, env_or};
use super::ConfigError;

/// Executor type selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutorType {
    /// Stub executor - runs nothing, the plan is printed instead (default).
    #[default]
    Stub,
    /// CGI executor - runs the include file through an interpreter.
    Cgi,
}

/// Executor configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Executor type to use.
    pub executor_type: ExecutorType,
    /// Interpreter program for the CGI executor (default: php-cgi).
    pub interpreter: String,
    /// Execution timeout (None = no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            executor_type: ExecutorType::default(),
            interpreter: "php-cgi".into(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ExecutorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or("EXECUTOR", "stub");
        let executor_type = parse_executor_type(&raw).ok_or_else(|| ConfigError::Invalid {
            key: "EXECUTOR".into(),
            message: format!("'{}', expected stub or cgi", raw),
        })?;

        let interpreter = env_or("CGI_INTERPRETER", "php-cgi");
        if executor_type == ExecutorType::Cgi && interpreter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "CGI_INTERPRETER".into(),
                message: "interpreter cannot be empty".into(),
            });
        }

        Ok(Self {
            executor_type,
            interpreter,
            timeout: env_duration("EXECUTE_TIMEOUT", "30s")?,
        })
    }
}

fn parse_executor_type(raw: &str) -> Option<ExecutorType> {
    match raw.to_lowercase().as_str() {
        "stub" | "" => Some(ExecutorType::Stub),
        "cgi" => Some(ExecutorType::Cgi),
        _ => None,
    }
}
