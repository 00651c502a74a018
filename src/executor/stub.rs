use async_trait::async_trait;
use tracing::debug;

use super::{ExecutorError, FileExecutor};
use crate::types::{ScriptRequest, ScriptResponse};

/// Stub executor that returns empty responses.
///
/// Nothing is run; useful to inspect the plan without side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubExecutor;

impl StubExecutor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileExecutor for StubExecutor {
    async fn execute(&self, request: ScriptRequest) -> Result<ScriptResponse, ExecutorError> {
        debug!(script = %request.script_path, "stub executor skipped script");
        Ok(ScriptResponse::default())
    }

    #[inline]
    fn name(&self) -> &'static str {
        "stub"
    }
}
