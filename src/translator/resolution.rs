//! Result of a successful translation.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// CGI meta-variables produced by the translator (RFC 3875 section 4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaVariable {
    PathInfo,
    PathTranslated,
    ScriptName,
    PhpSelf,
    ScriptFilename,
}

impl MetaVariable {
    pub const ALL: [MetaVariable; 5] = [
        MetaVariable::PathInfo,
        MetaVariable::PathTranslated,
        MetaVariable::ScriptName,
        MetaVariable::PhpSelf,
        MetaVariable::ScriptFilename,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetaVariable::PathInfo => "PATH_INFO",
            MetaVariable::PathTranslated => "PATH_TRANSLATED",
            MetaVariable::ScriptName => "SCRIPT_NAME",
            MetaVariable::PhpSelf => "PHP_SELF",
            MetaVariable::ScriptFilename => "SCRIPT_FILENAME",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|var| var.as_str() == name)
    }
}

impl std::fmt::Display for MetaVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meta-variables in the order they were set.
///
/// Small enough that a list beats a map. Entries with empty values are never
/// stored: a variable whose precondition does not hold is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaVariables(Vec<(MetaVariable, String)>);

impl MetaVariables {
    pub(crate) fn set(&mut self, var: MetaVariable, value: String) {
        match self.0.iter_mut().find(|(v, _)| *v == var) {
            Some(entry) => entry.1 = value,
            None => self.0.push((var, value)),
        }
    }

    pub fn get(&self, var: MetaVariable) -> Option<&str> {
        self.0
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, value)| value.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(var, value)| (var.as_str(), value.as_str()))
    }
}

impl Serialize for MetaVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Everything `prepare` computed for one request URI.
///
/// Paths are forward-slash strings rooted at the document root. The value is
/// immutable; translating another URI produces a new `Resolution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub(crate) document_root: String,
    pub(crate) request_uri: String,
    pub(crate) query: String,
    pub(crate) fragment: String,
    pub(crate) segments: Vec<String>,
    pub(crate) path_parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) translate_directory: Option<String>,
    pub(crate) include_file: String,
    pub(crate) virtual_uri: String,
    pub(crate) script_name: String,
    pub(crate) path_info: String,
    pub(crate) meta_variables: MetaVariables,
}

impl Resolution {
    #[inline]
    pub fn document_root(&self) -> &str {
        &self.document_root
    }

    #[inline]
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// Query string including its leading `?`, or empty.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Fragment including its leading `#`, or empty.
    #[inline]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Normalized request path segments.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments captured by parameter directories, in walk order.
    #[inline]
    pub fn parameters(&self) -> &[String] {
        &self.path_parameters
    }

    #[inline]
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.path_parameters.get(index).map(String::as_str)
    }

    pub fn parameter_or<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.parameter(index).unwrap_or(default)
    }

    /// Extension from the request that was swapped for a search extension
    /// (`json` for `/search.json` served by `search.php`).
    #[inline]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Directory containing the include file; `None` for the document root itself.
    #[inline]
    pub fn translate_directory(&self) -> Option<&str> {
        self.translate_directory.as_deref()
    }

    /// Absolute path of the file to execute.
    #[inline]
    pub fn include_file(&self) -> &str {
        &self.include_file
    }

    /// Include file relative to the document root, plus path info and query.
    #[inline]
    pub fn virtual_uri(&self) -> &str {
        &self.virtual_uri
    }

    #[inline]
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    #[inline]
    pub fn path_info(&self) -> &str {
        &self.path_info
    }

    #[inline]
    pub fn meta_variables(&self) -> &MetaVariables {
        &self.meta_variables
    }

    /// Look up a meta-variable by its CGI name (`SCRIPT_NAME`, `PATH_INFO`, ...).
    pub fn meta_variable(&self, name: &str) -> Option<&str> {
        MetaVariable::from_name(name).and_then(|var| self.meta_variables.get(var))
    }
}
