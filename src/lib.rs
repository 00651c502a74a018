//! path_translator - request URI to script translation for PHP-style front controllers.
//!
//! This crate maps a request URI onto a file below a document root by walking
//! the path against the filesystem, and computes the CGI meta-variables
//! (`SCRIPT_NAME`, `PATH_INFO`, `PHP_SELF`, ...) a script expects to see.
//!
//! # Features
//!
//! - **Directory walk**: directories, extensionless files and `%VAR%` parameter directories
//! - **Pure translation**: [`PathTranslator::prepare`] returns a fresh [`Resolution`]
//! - **Pluggable filesystem**: real disk or an in-memory tree for tests
//! - **Execution**: run the resolved file through `php-cgi` or a stub
//! - **Structured logging**: JSON logs with tracing
//!
//! # Example
//!
//! ```rust,ignore
//! use path_translator::PathTranslator;
//!
//! let translator = PathTranslator::new("/var/www/html")?;
//! let resolution = translator.prepare("/categories/1/items/2/detail")?;
//!
//! assert_eq!(resolution.parameters(), ["1", "2"]);
//! assert_eq!(resolution.script_name(), "/categories/1/items/2/detail.php");
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (8 chars), empty when built outside a checkout
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Full version string: "0.1.0 (abc12345)"
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_VERSION"), ")");

pub mod config;
pub mod executor;
pub mod logging;
pub mod translator;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use translator::{PathTranslator, Resolution, TranslateError};
