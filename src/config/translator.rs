//! Path translator configuration.

use super::parse::{env_bool, env_or};
use super::ConfigError;

/// Path translator configuration loaded from environment.
///
/// Values are taken as-is here; [`PathTranslator::from_config`] validates them.
///
/// [`PathTranslator::from_config`]: crate::translator::PathTranslator::from_config
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Document root directory (default: /var/www/html).
    pub document_root: String,
    /// Directory name matching any segment (default: %VAR%).
    pub parameter_directory_name: String,
    /// Comma-separated search extensions in lookup order (default: php,html).
    pub search_extensions: String,
    /// Percent-decode segments before walking them.
    pub decode_segments: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            document_root: "/var/www/html".into(),
            parameter_directory_name: crate::translator::DEFAULT_PARAMETER_DIRECTORY.into(),
            search_extensions: crate::translator::DEFAULT_SEARCH_EXTENSIONS.join(","),
            decode_segments: false,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let document_root = env_or("DOCUMENT_ROOT", &defaults.document_root);
        if document_root.is_empty() {
            return Err(ConfigError::Invalid {
                key: "DOCUMENT_ROOT".into(),
                message: "document root cannot be empty".into(),
            });
        }

        Ok(Self {
            document_root,
            parameter_directory_name: env_or(
                "PARAMETER_DIRECTORY",
                &defaults.parameter_directory_name,
            ),
            search_extensions: env_or("SEARCH_EXTENSIONS", &defaults.search_extensions),
            decode_segments: env_bool("DECODE_SEGMENTS", defaults.decode_segments),
        })
    }
}
