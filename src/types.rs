//! Core types for script execution requests and responses.

use std::time::Duration;

use crate::translator::Resolution;

/// Key-value pair type for parameters (faster than HashMap for small collections).
pub type ParamList = Vec<(String, String)>;

// =============================================================================
// Script Request
// =============================================================================

/// Everything an executor needs to run a translated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRequest {
    /// Absolute path of the file to execute
    pub script_path: String,
    /// Working directory for the script (None = leave unchanged)
    pub working_dir: Option<String>,
    /// Server variables exported to the script environment
    pub server_vars: ParamList,
    /// Execution timeout (None = no timeout)
    pub timeout: Option<Duration>,
}

impl ScriptRequest {
    /// Build the execution plan for a resolution.
    ///
    /// Server variables are the resolution's meta-variables followed by
    /// `DOCUMENT_ROOT`, `REQUEST_URI` and `QUERY_STRING`.
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let mut server_vars: ParamList = resolution
            .meta_variables()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        server_vars.push(("DOCUMENT_ROOT".into(), resolution.document_root().into()));
        server_vars.push(("REQUEST_URI".into(), resolution.request_uri().into()));
        server_vars.push((
            "QUERY_STRING".into(),
            resolution
                .query()
                .strip_prefix('?')
                .unwrap_or_default()
                .into(),
        ));

        Self {
            script_path: resolution.include_file().to_string(),
            working_dir: resolution.translate_directory().map(str::to_string),
            server_vars,
            timeout: None,
        }
    }

    /// Set the execution timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up a server variable by name.
    pub fn server_var(&self, name: &str) -> Option<&str> {
        self.server_vars
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

// =============================================================================
// Script Response
// =============================================================================

/// Script execution response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptResponse {
    /// Response body
    pub body: String,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Process exit code (None when nothing was run or the process was signalled)
    pub exit_code: Option<i32>,
}

impl ScriptResponse {
    /// Look up a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
