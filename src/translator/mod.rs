//! Request URI to script translation.
//!
//! [`PathTranslator`] maps a request URI onto a file below a document root
//! by walking the path segment by segment against the filesystem, the way a
//! front controller behind a rewrite rule would:
//!
//! - a segment naming a real directory descends into it
//! - a segment naming a real file (exactly, or with one of the search
//!   extensions appended) ends the walk; remaining segments become `PATH_INFO`
//! - a segment matching nothing descends into the parameter directory
//!   (`%VAR%` by default) if one exists, capturing the segment as a parameter
//! - when the walk ends on a directory, `index.php` / `index.html` is used
//!
//! # Example
//!
//! ```rust,ignore
//! use path_translator::translator::PathTranslator;
//!
//! let translator = PathTranslator::new("/var/www/html")?;
//! let resolution = translator.prepare("/categories/1/modify/foo?x=1")?;
//!
//! assert_eq!(resolution.include_file(), "/var/www/html/categories/%VAR%/modify.php");
//! assert_eq!(resolution.meta_variable("PATH_INFO"), Some("/foo"));
//! assert_eq!(resolution.parameter(0), Some("1"));
//! ```
//!
//! `prepare` takes `&self` and returns a fresh [`Resolution`], so a single
//! translator can serve concurrent requests.

mod error;
pub mod probe;
mod resolution;
pub mod segments;
pub mod uri;

pub use error::TranslateError;
pub use probe::{find_file, FilesystemProbe, InMemoryProbe, StdFilesystemProbe};
pub use resolution::{MetaVariable, MetaVariables, Resolution};

use tracing::debug;

use crate::config::TranslatorConfig;
use segments::parse_request_path;
use uri::RequestUri;

/// Default parameter directory marker.
pub const DEFAULT_PARAMETER_DIRECTORY: &str = "%VAR%";

/// Default search extensions, in lookup order.
pub const DEFAULT_SEARCH_EXTENSIONS: [&str; 2] = ["php", "html"];

/// Directory index candidates. Independent of the configured search extensions.
const INDEX_BASENAME: &str = "index";
const INDEX_EXTENSIONS: [&str; 2] = ["php", "html"];

/// Translates request URIs into include files below a document root.
#[derive(Debug, Clone)]
pub struct PathTranslator<P = StdFilesystemProbe> {
    document_root: String,
    parameter_directory_name: String,
    search_extensions: Vec<String>,
    decode_segments: bool,
    probe: P,
}

impl PathTranslator<StdFilesystemProbe> {
    /// Translator over the real filesystem with default settings.
    pub fn new(document_root: &str) -> Result<Self, TranslateError> {
        Self::with_probe(document_root, StdFilesystemProbe)
    }
}

impl<P: FilesystemProbe> PathTranslator<P> {
    /// Translator over `probe` with default settings.
    pub fn with_probe(document_root: &str, probe: P) -> Result<Self, TranslateError> {
        Ok(Self {
            document_root: normalize_document_root(document_root)?,
            parameter_directory_name: DEFAULT_PARAMETER_DIRECTORY.to_string(),
            search_extensions: DEFAULT_SEARCH_EXTENSIONS.map(String::from).to_vec(),
            decode_segments: false,
            probe,
        })
    }

    /// Translator built from loaded configuration.
    pub fn from_config(config: &TranslatorConfig, probe: P) -> Result<Self, TranslateError> {
        let mut translator = Self::with_probe(&config.document_root, probe)?;
        translator
            .set_parameter_directory_name(&config.parameter_directory_name)?
            .set_search_extensions_list(&config.search_extensions)?
            .set_decode_segments(config.decode_segments);
        Ok(translator)
    }

    /// Set the document root. Backslashes become `/` and trailing `/` are dropped.
    pub fn set_document_root(&mut self, document_root: &str) -> Result<&mut Self, TranslateError> {
        self.document_root = normalize_document_root(document_root)?;
        Ok(self)
    }

    /// Set the name of the directory that matches any segment.
    pub fn set_parameter_directory_name(&mut self, name: &str) -> Result<&mut Self, TranslateError> {
        const KEY: &str = "parameter directory name";
        if name.is_empty() {
            return Err(TranslateError::invalid(KEY, "must not be empty"));
        }
        if name == "." || name == ".." {
            return Err(TranslateError::invalid(KEY, format!("{:?} is a dot segment", name)));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(TranslateError::invalid(
                KEY,
                format!("{:?} must be a single path segment", name),
            ));
        }
        self.parameter_directory_name = name.to_string();
        Ok(self)
    }

    /// Set the ordered search extensions (without dots). An empty list
    /// disables extension search.
    pub fn set_search_extensions<I, S>(&mut self, extensions: I) -> Result<&mut Self, TranslateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.search_extensions = extensions
            .into_iter()
            .enumerate()
            .map(|(i, ext)| validate_extension(i, ext.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Set the search extensions from a comma-separated list (`"html,php"`).
    /// A blank list disables extension search.
    pub fn set_search_extensions_list(&mut self, list: &str) -> Result<&mut Self, TranslateError> {
        if list.trim().is_empty() {
            self.search_extensions.clear();
            return Ok(self);
        }
        self.set_search_extensions(list.split(','))
    }

    /// Percent-decode segments before walking them.
    pub fn set_decode_segments(&mut self, decode: bool) -> &mut Self {
        self.decode_segments = decode;
        self
    }

    #[inline]
    pub fn document_root(&self) -> &str {
        &self.document_root
    }

    #[inline]
    pub fn parameter_directory_name(&self) -> &str {
        &self.parameter_directory_name
    }

    #[inline]
    pub fn search_extensions(&self) -> &[String] {
        &self.search_extensions
    }

    #[inline]
    pub fn decode_segments(&self) -> bool {
        self.decode_segments
    }

    /// Translate `request_uri` into a [`Resolution`].
    ///
    /// Fails with [`TranslateError::BadRequest`] before touching the
    /// filesystem when the URI is not of the form `/path[?query][#fragment]`,
    /// and with [`TranslateError::NotFound`] when no file matches.
    pub fn prepare(&self, request_uri: &str) -> Result<Resolution, TranslateError> {
        let bad_request = || TranslateError::BadRequest {
            request_uri: request_uri.to_string(),
        };
        let uri = RequestUri::parse(request_uri).ok_or_else(bad_request)?;
        let segments = parse_request_path(uri.path, self.decode_segments).ok_or_else(bad_request)?;

        let root = self.document_root.as_str();
        let mut translate_directory = String::new();
        let mut script_name = String::new();
        let mut path_parameters = Vec::new();
        let mut extension = None;
        // (index of the file segment, matched file name)
        let mut matched: Option<(usize, String)> = None;

        for (index, segment) in segments.iter().enumerate() {
            let dir = format!("{}{}", root, translate_directory);

            if let Some((basename, ext)) = segment.rsplit_once('.') {
                if let Some(found) = find_file::<_, &str>(&self.probe, &dir, segment, &[]) {
                    matched = Some((index, found));
                    break;
                }
                if !self.search_extensions.is_empty()
                    && !self.search_extensions.iter().any(|e| e == ext)
                {
                    if let Some(found) =
                        find_file(&self.probe, &dir, basename, &self.search_extensions)
                    {
                        debug!(segment = %segment, extension = ext, "requested extension swapped");
                        extension = Some(ext.to_string());
                        matched = Some((index, found));
                        break;
                    }
                }
            }

            if self.probe.is_directory(&format!("{}/{}", dir, segment)) {
                script_name.push('/');
                script_name.push_str(segment);
                translate_directory.push('/');
                translate_directory.push_str(segment);
                continue;
            }

            if let Some(found) = find_file(&self.probe, &dir, segment, &self.search_extensions) {
                matched = Some((index, found));
                break;
            }

            if self
                .probe
                .is_directory(&format!("{}/{}", dir, self.parameter_directory_name))
            {
                debug!(segment = %segment, index = path_parameters.len(), "captured path parameter");
                script_name.push('/');
                script_name.push_str(segment);
                translate_directory.push('/');
                translate_directory.push_str(&self.parameter_directory_name);
                path_parameters.push(segment.clone());
                continue;
            }

            return Err(TranslateError::NotFound {
                segment: Some(segment.clone()),
                request_path: uri.path.to_string(),
            });
        }

        let translate_directory = translate_directory.trim_end_matches('/');

        // First segment that belongs to PATH_INFO.
        let (path_info_start, filename) = match matched {
            Some((index, filename)) => {
                script_name.push('/');
                script_name.push_str(&filename);
                (index + 1, filename)
            }
            None => {
                let dir = format!("{}{}", root, translate_directory);
                let filename = find_file(&self.probe, &dir, INDEX_BASENAME, &INDEX_EXTENSIONS)
                    .ok_or_else(|| TranslateError::NotFound {
                        segment: None,
                        request_path: uri.path.to_string(),
                    })?;
                // A trailing slash already left a separator behind. With no
                // segments at all (`/..`) the separator is still added, giving `/index.php`.
                if !script_name.ends_with('/') {
                    script_name.push('/');
                }
                script_name.push_str(&filename);
                (segments.len(), filename)
            }
        };

        let include_file = format!("{}/{}", translate_directory, filename);
        let path_info: String = segments
            .iter()
            .skip(path_info_start)
            .map(|segment| format!("/{}", segment))
            .collect();

        let mut meta_variables = MetaVariables::default();
        if !path_info.is_empty() {
            meta_variables.set(MetaVariable::PathInfo, path_info.clone());
            meta_variables.set(MetaVariable::PathTranslated, format!("{}{}", root, path_info));
        }
        if !script_name.is_empty() {
            meta_variables.set(MetaVariable::ScriptName, script_name.clone());
            meta_variables.set(MetaVariable::PhpSelf, format!("{}{}", script_name, path_info));
            meta_variables.set(MetaVariable::ScriptFilename, format!("{}{}", root, script_name));
        }

        let resolution = Resolution {
            document_root: self.document_root.clone(),
            request_uri: request_uri.to_string(),
            query: uri.query.to_string(),
            fragment: uri.fragment.to_string(),
            translate_directory: (!translate_directory.is_empty())
                .then(|| format!("{}{}", root, translate_directory)),
            virtual_uri: format!("{}{}{}", include_file, path_info, uri.query),
            include_file: format!("{}{}", root, include_file),
            segments,
            path_parameters,
            extension,
            script_name,
            path_info,
            meta_variables,
        };

        debug!(
            request_uri = %request_uri,
            include_file = %resolution.include_file,
            parameters = resolution.path_parameters.len(),
            "request translated"
        );

        Ok(resolution)
    }
}

fn normalize_document_root(document_root: &str) -> Result<String, TranslateError> {
    const KEY: &str = "document root";
    if document_root.is_empty() {
        return Err(TranslateError::invalid(KEY, "must not be empty"));
    }
    if document_root.contains('\0') {
        return Err(TranslateError::invalid(KEY, "contains a NUL byte"));
    }
    let normalized = document_root.replace('\\', "/");
    Ok(normalized.trim_end_matches('/').to_string())
}

fn validate_extension(index: usize, ext: &str) -> Result<String, TranslateError> {
    const KEY: &str = "search extensions";
    let ext = ext.trim();
    if ext.is_empty() {
        return Err(TranslateError::invalid(KEY, format!("entry {} is empty", index + 1)));
    }
    if ext.contains(['.', '/', '\\', '\0']) {
        return Err(TranslateError::invalid(
            KEY,
            format!("{:?} must be a bare extension without dots or separators", ext),
        ));
    }
    Ok(ext.to_string())
}
