//! Structural split of a raw request URI.

use regex::Regex;
use std::sync::OnceLock;

static REQUEST_URI_REGEX: OnceLock<Regex> = OnceLock::new();

fn request_uri_regex() -> &'static Regex {
    REQUEST_URI_REGEX
        .get_or_init(|| Regex::new(r"\A(/[^?#]*)(\?[^#]*)?(#.*)?\z").expect("Invalid regex"))
}

/// A request URI split into path, query and fragment.
///
/// `query` keeps its leading `?` and `fragment` its leading `#`, so
/// `path + query + fragment` reproduces the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestUri<'a> {
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> RequestUri<'a> {
    /// Split `uri`, or return `None` when it does not start with `/`
    /// (or its fragment spans lines).
    pub fn parse(uri: &'a str) -> Option<Self> {
        let caps = request_uri_regex().captures(uri)?;
        let group = |i| caps.get(i).map(|m| m.as_str()).unwrap_or("");

        Some(Self {
            path: group(1),
            query: group(2),
            fragment: group(3),
        })
    }
}
