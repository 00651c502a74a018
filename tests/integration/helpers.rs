//! Test helpers and utilities

use std::fs;
use std::path::Path;

use http::StatusCode;
use path_translator::translator::{PathTranslator, Resolution, TranslateError};
use tempfile::TempDir;

/// Files of the standard document root fixture, relative to the root.
pub const FIXTURE_FILES: &[&str] = &[
    "index.php",
    "test.html",
    "test.php",
    "categories/search.php",
    "categories/%VAR%/index.php",
    "categories/%VAR%/modify.php",
    "categories/%VAR%/items/%VAR%/index.php",
    "categories/%VAR%/items/%VAR%/detail.php",
    ".foo.bar.baz/%VAR%/.foo.bar.baz.php",
];

/// Document root in a temporary directory, removed on drop
pub struct DocumentRoot {
    _dir: TempDir,
    pub root: String,
}

#[allow(dead_code)]
impl DocumentRoot {
    /// Document root with the standard fixture tree
    pub fn new() -> Self {
        Self::with_files(FIXTURE_FILES)
    }

    /// Document root with no files at all
    pub fn empty() -> Self {
        Self::with_files(&[])
    }

    /// Document root containing `files` (relative paths)
    pub fn with_files(files: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir
            .path()
            .to_str()
            .expect("Temp dir is not UTF-8")
            .to_string();

        let doc_root = Self { _dir: dir, root };
        for file in files {
            doc_root.add_file(file, &format!("<?php // {}\n", file));
        }
        doc_root
    }

    /// Absolute path of `relative` below the root
    pub fn path(&self, relative: &str) -> String {
        format!("{}/{}", self.root, relative)
    }

    /// Create a file (and its parent directories)
    pub fn add_file(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = Path::new(&path).parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }

    /// Create a directory (and its parents)
    pub fn add_dir(&self, relative: &str) {
        fs::create_dir_all(self.path(relative)).expect("Failed to create fixture dir");
    }

    /// Translator over this root with default settings
    pub fn translator(&self) -> PathTranslator {
        PathTranslator::new(&self.root).expect("Failed to create translator")
    }

    /// Translate with default settings, panicking on failure
    pub fn prepare(&self, request_uri: &str) -> Resolution {
        self.translator()
            .prepare(request_uri)
            .unwrap_or_else(|e| panic!("prepare({:?}) failed: {}", request_uri, e))
    }

    /// Translate with default settings, panicking on success
    pub fn prepare_err(&self, request_uri: &str) -> TranslateError {
        match self.translator().prepare(request_uri) {
            Ok(resolution) => panic!(
                "prepare({:?}) unexpectedly resolved to {}",
                request_uri,
                resolution.include_file()
            ),
            Err(e) => e,
        }
    }
}

/// Assert error status code
pub fn assert_status(err: &TranslateError, expected: StatusCode) {
    assert_eq!(
        err.status_code(),
        Some(expected),
        "Expected status {}, got {:?} ({})",
        expected,
        err.status_code(),
        err
    );
}

/// Assert the CGI variables derived from script name and path info agree
pub fn assert_consistent(doc_root: &DocumentRoot, resolution: &Resolution) {
    let script_name = resolution.script_name();
    let path_info = resolution.path_info();

    assert_eq!(resolution.meta_variable("SCRIPT_NAME"), Some(script_name));
    assert_eq!(
        resolution.meta_variable("SCRIPT_FILENAME"),
        Some(format!("{}{}", doc_root.root, script_name).as_str())
    );
    assert_eq!(
        resolution.meta_variable("PHP_SELF"),
        Some(format!("{}{}", script_name, path_info).as_str())
    );

    if path_info.is_empty() {
        assert_eq!(resolution.meta_variable("PATH_INFO"), None);
        assert_eq!(resolution.meta_variable("PATH_TRANSLATED"), None);
    } else {
        assert_eq!(resolution.meta_variable("PATH_INFO"), Some(path_info));
        assert_eq!(
            resolution.meta_variable("PATH_TRANSLATED"),
            Some(format!("{}{}", doc_root.root, path_info).as_str())
        );
    }
}
