//! Translation error types.

use std::fmt;

use http::StatusCode;

/// Error returned by [`PathTranslator`](super::PathTranslator) setters and `prepare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A configuration value was rejected by a setter.
    InvalidConfiguration { key: &'static str, message: String },
    /// The request URI does not have the shape `/path[?query][#fragment]`.
    BadRequest { request_uri: String },
    /// No file could be matched for the request path.
    NotFound {
        /// Segment that matched nothing (None when the index fallback failed).
        segment: Option<String>,
        request_path: String,
    },
}

impl TranslateError {
    pub(crate) fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        TranslateError::InvalidConfiguration {
            key,
            message: message.into(),
        }
    }

    /// HTTP status for request errors, `None` for configuration errors.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            TranslateError::InvalidConfiguration { .. } => None,
            TranslateError::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            TranslateError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
        }
    }

    /// Status to report at an HTTP boundary; configuration errors map to 500.
    pub fn http_status(&self) -> StatusCode {
        self.status_code()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, TranslateError::NotFound { .. })
    }

    #[inline]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, TranslateError::BadRequest { .. })
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::InvalidConfiguration { key, message } => {
                write!(f, "invalid {}: {}", key, message)
            }
            TranslateError::BadRequest { request_uri } => {
                write!(f, "the request URI {:?} is not valid", request_uri)
            }
            TranslateError::NotFound {
                segment: Some(segment),
                request_path,
            } => write!(
                f,
                "no file corresponds to segment {:?} of request path {:?}",
                segment, request_path
            ),
            TranslateError::NotFound {
                segment: None,
                request_path,
            } => write!(f, "no file corresponds to request path {:?}", request_path),
        }
    }
}

impl std::error::Error for TranslateError {}
