//! Script execution backends for path_translator.
//!
//! The translator only computes a plan; running the resolved file is the job
//! of a [`FileExecutor`]. An executor exports the server variables into the
//! script environment, switches to the translate directory when there is one,
//! and runs the include file.
//!
//! # Available Executors
//!
//! | Executor | Description |
//! |----------|-------------|
//! | [`CgiExecutor`] | Runs the file through an interpreter process (`php-cgi` by default) |
//! | [`StubExecutor`] | Runs nothing and returns an empty response, for dry runs |
//!
//! # Example
//!
//! ```rust,ignore
//! use path_translator::executor::{CgiExecutor, FileExecutor};
//! use path_translator::translator::PathTranslator;
//!
//! let translator = PathTranslator::new("/var/www/html")?;
//! let resolution = translator.prepare("/categories/1/")?;
//!
//! let executor = CgiExecutor::new("php-cgi");
//! let response = executor.execute_resolution(&resolution, None).await?;
//! print!("{}", response.body);
//! ```

mod cgi;
mod stub;

use std::time::Duration;

use async_trait::async_trait;

pub use cgi::{split_cgi_output, CgiExecutor};
pub use stub::StubExecutor;

use crate::translator::Resolution;
use crate::types::{ScriptRequest, ScriptResponse};

/// Error message used when execution exceeds its timeout.
pub const EXECUTE_TIMEOUT_ERROR: &str = "Execution timed out";

/// Error type for script execution.
#[derive(Debug, Clone)]
pub struct ExecutorError {
    pub message: String,
}

impl ExecutorError {
    /// Returns true if this error indicates an execution timeout.
    pub fn is_timeout(&self) -> bool {
        self.message == EXECUTE_TIMEOUT_ERROR
    }
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExecutorError {}

impl From<String> for ExecutorError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ExecutorError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Runs translated scripts.
///
/// Implementations must be thread-safe and async-compatible.
#[async_trait]
pub trait FileExecutor: Send + Sync {
    /// Executes a script with the given request data.
    async fn execute(&self, request: ScriptRequest) -> Result<ScriptResponse, ExecutorError>;

    /// Returns the name of this executor for logging purposes.
    fn name(&self) -> &'static str;

    /// Builds the request for `resolution` and executes it.
    async fn execute_resolution(
        &self,
        resolution: &Resolution,
        timeout: Option<Duration>,
    ) -> Result<ScriptResponse, ExecutorError> {
        let request = ScriptRequest::from_resolution(resolution).with_timeout(timeout);
        self.execute(request).await
    }
}
