use std::process::ExitCode;

use tracing::{error, info, warn};

use path_translator::config::{Config, ExecutorType};
use path_translator::executor::{CgiExecutor, FileExecutor};
use path_translator::translator::{PathTranslator, StdFilesystemProbe};
use path_translator::{logging, TranslateError, VERSION};

fn main() -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    // Initialize logging
    logging::init(&config.logging);

    info!("Starting path_translator {}", VERSION);
    config.log_summary();

    // Request URI: first argument, then REQUEST_URI, then "/"
    let request_uri = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("REQUEST_URI").ok())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "/".to_string());

    let translator = match PathTranslator::from_config(&config.translator, StdFilesystemProbe) {
        Ok(translator) => translator,
        Err(e) => {
            error!(error = %e, "invalid translator configuration");
            println!("{}", error_body(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let resolution = match translator.prepare(&request_uri) {
        Ok(resolution) => resolution,
        Err(e) => {
            warn!(request_uri = %request_uri, error = %e, "translation failed");
            println!("{}", error_body(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    match config.executor.executor_type {
        ExecutorType::Stub => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
            Ok(ExitCode::SUCCESS)
        }
        ExecutorType::Cgi => {
            // Single child process, no need for a multi-threaded runtime
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            let executor = CgiExecutor::new(&config.executor.interpreter);
            info!(
                executor = executor.name(),
                include_file = %resolution.include_file(),
                "Executing script"
            );
            let response = runtime
                .block_on(executor.execute_resolution(&resolution, config.executor.timeout))?;

            print!("{}", response.body);

            match response.exit_code {
                Some(0) => Ok(ExitCode::SUCCESS),
                code => {
                    warn!(
                        request_uri = %request_uri,
                        exit_code = ?code,
                        "script exited with failure"
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn error_body(error: &TranslateError) -> serde_json::Value {
    serde_json::json!({
        "status": error.http_status().as_u16(),
        "error": error.to_string(),
    })
}
