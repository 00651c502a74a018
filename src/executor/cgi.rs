use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{ExecutorError, FileExecutor, EXECUTE_TIMEOUT_ERROR};
use crate::types::{ScriptRequest, ScriptResponse};

/// Executor that runs the include file in an interpreter process.
///
/// The interpreter gets the script path as its only argument. Server
/// variables are exported into the child environment and the child starts
/// in the request's working directory. The child is killed if the call is
/// dropped or times out.
#[derive(Debug, Clone)]
pub struct CgiExecutor {
    interpreter: String,
}

impl CgiExecutor {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    fn command(&self, request: &ScriptRequest) -> Command {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(&request.script_path)
            .envs(request.server_vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(ref dir) = request.working_dir {
            command.current_dir(dir);
        }

        command
    }
}

#[async_trait]
impl FileExecutor for CgiExecutor {
    async fn execute(&self, request: ScriptRequest) -> Result<ScriptResponse, ExecutorError> {
        debug!(
            interpreter = %self.interpreter,
            script = %request.script_path,
            working_dir = ?request.working_dir,
            "executing script"
        );

        let mut command = self.command(&request);
        let output = command.output();
        let output = match request.timeout {
            Some(timeout) => tokio::time::timeout(timeout, output)
                .await
                .map_err(|_| ExecutorError::from(EXECUTE_TIMEOUT_ERROR))?,
            None => output.await,
        }
        .map_err(|e| ExecutorError::from(format!("failed to run {}: {}", self.interpreter, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!(script = %request.script_path, stderr = %stderr.trim_end(), "script wrote to stderr");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (headers, body) = split_cgi_output(&stdout);

        Ok(ScriptResponse {
            body: body.to_string(),
            headers,
            exit_code: output.status.code(),
        })
    }

    #[inline]
    fn name(&self) -> &'static str {
        "cgi"
    }
}

/// Split interpreter output into CGI headers and body.
///
/// Output counts as having headers only when everything before the first
/// blank line consists of `Name: value` lines. Otherwise the whole output is
/// the body.
pub fn split_cgi_output(raw: &str) -> (Vec<(String, String)>, &str) {
    let separator = ["\r\n\r\n", "\n\n"]
        .iter()
        .filter_map(|sep| raw.find(sep).map(|pos| (pos, sep.len())))
        .min_by_key(|&(pos, _)| pos);

    let Some((pos, sep_len)) = separator else {
        return (Vec::new(), raw);
    };

    let mut headers = Vec::new();
    for line in raw[..pos].lines() {
        match line.split_once(':') {
            Some((name, value)) if is_header_name(name) => {
                headers.push((name.to_string(), value.trim().to_string()));
            }
            _ => return (Vec::new(), raw),
        }
    }

    if headers.is_empty() {
        return (headers, raw);
    }

    (headers, &raw[pos + sep_len..])
}

fn is_header_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
