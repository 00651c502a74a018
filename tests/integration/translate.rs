//! Request translation tests against a real document root

use crate::helpers::*;
use http::StatusCode;
use path_translator::translator::{InMemoryProbe, PathTranslator, TranslateError};

/// Test the root URI falls back to the root index file
#[test]
fn test_root_uses_index_file() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/");

    assert_eq!(resolution.include_file(), doc_root.path("index.php"));
    assert_eq!(resolution.script_name(), "/index.php");
    assert_eq!(resolution.translate_directory(), None);
    assert_eq!(resolution.virtual_uri(), "/index.php");
    assert_consistent(&doc_root, &resolution);
}

/// Test `.` segments are ignored
#[test]
fn test_dot_segments_are_dropped() {
    let doc_root = DocumentRoot::new();

    let plain = doc_root.prepare("/categories/1/modify");
    let dotted = doc_root.prepare("/./categories/./1/./modify/.");

    assert_eq!(dotted.include_file(), plain.include_file());
    assert_eq!(dotted.script_name(), plain.script_name());
    assert_eq!(dotted.parameters(), plain.parameters());
    assert_eq!(dotted.path_info(), "");
}

/// Test `..` never climbs above the document root
#[test]
fn test_dotdot_cannot_escape_root() {
    let doc_root = DocumentRoot::new();
    let root = doc_root.prepare("/");

    for uri in ["/../../../", "/..", "/categories/../../../"] {
        let resolution = doc_root.prepare(uri);
        assert_eq!(resolution.include_file(), root.include_file(), "{}", uri);
        assert_eq!(resolution.script_name(), "/index.php", "{}", uri);
        assert_eq!(resolution.translate_directory(), None, "{}", uri);
    }
}

/// Test `..` backtracks one accumulated segment
#[test]
fn test_dotdot_backtracks() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/categories/1/../search");

    assert_eq!(resolution.include_file(), doc_root.path("categories/search.php"));
    assert!(resolution.parameters().is_empty());
}

/// Test parameter directories capture segments and fall back to their index
#[test]
fn test_parameters_with_index() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/categories/1/items/2/");

    assert_eq!(resolution.parameters(), ["1", "2"]);
    assert_eq!(resolution.parameter(0), Some("1"));
    assert_eq!(resolution.parameter(1), Some("2"));
    assert_eq!(resolution.parameter_or(2, "none"), "none");
    assert!(resolution
        .include_file()
        .ends_with("/categories/%VAR%/items/%VAR%/index.php"));
    assert_eq!(
        resolution.translate_directory(),
        Some(doc_root.path("categories/%VAR%/items/%VAR%").as_str())
    );
    assert_eq!(resolution.script_name(), "/categories/1/items/2/index.php");
    assert_consistent(&doc_root, &resolution);
}

/// Test parameter directories without an index file are not found
#[test]
fn test_parameters_without_index_not_found() {
    let doc_root = DocumentRoot::empty();
    doc_root.add_dir("categories/%VAR%/items/%VAR%");

    let err = doc_root.prepare_err("/categories/1/items/2/");

    assert_status(&err, StatusCode::NOT_FOUND);
    assert!(matches!(err, TranslateError::NotFound { segment: None, .. }));
}

/// Test a real file below parameter directories
#[test]
fn test_real_file_below_parameters() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/categories/1/items/2/detail.php");

    assert_eq!(resolution.parameters(), ["1", "2"]);
    assert_eq!(
        resolution.meta_variable("SCRIPT_NAME"),
        Some("/categories/1/items/2/detail.php")
    );
    assert_eq!(
        resolution.meta_variable("PHP_SELF"),
        Some("/categories/1/items/2/detail.php")
    );
    assert_eq!(resolution.meta_variable("PATH_INFO"), None);
    assert_eq!(resolution.extension(), None);
    assert_consistent(&doc_root, &resolution);
}

/// Test trailing segments after the script become PATH_INFO
#[test]
fn test_path_info_after_extensionless_script() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/categories/1/modify/foo/bar?x=1#top");

    assert_eq!(resolution.include_file(), doc_root.path("categories/%VAR%/modify.php"));
    assert_eq!(resolution.script_name(), "/categories/1/modify.php");
    assert_eq!(resolution.path_info(), "/foo/bar");
    assert_eq!(
        resolution.meta_variable("PHP_SELF"),
        Some("/categories/1/modify.php/foo/bar")
    );
    assert_eq!(
        resolution.virtual_uri(),
        "/categories/%VAR%/modify.php/foo/bar?x=1"
    );
    assert_eq!(resolution.query(), "?x=1");
    assert_eq!(resolution.fragment(), "#top");
    assert_consistent(&doc_root, &resolution);
}

/// Test a requested extension outside the search list is swapped
#[test]
fn test_extension_swap() {
    let doc_root = DocumentRoot::new();
    let mut translator = doc_root.translator();
    translator.set_search_extensions(["php"]).unwrap();

    let resolution = translator.prepare("/categories/search.json?q=test").unwrap();

    assert_eq!(resolution.virtual_uri(), "/categories/search.php?q=test");
    assert_eq!(resolution.extension(), Some("json"));
    assert_eq!(resolution.script_name(), "/categories/search.php");
}

/// Test the first configured extension wins
#[test]
fn test_search_extension_order() {
    let doc_root = DocumentRoot::new();
    let mut translator = doc_root.translator();

    translator.set_search_extensions(["html", "php"]).unwrap();
    assert!(translator.prepare("/test").unwrap().virtual_uri().ends_with(".html"));

    translator.set_search_extensions_list("php,html").unwrap();
    assert!(translator.prepare("/test").unwrap().virtual_uri().ends_with(".php"));
}

/// Test an exact file name is preferred over an extension search
#[test]
fn test_exact_dotted_name() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/test.html/more");

    assert_eq!(resolution.include_file(), doc_root.path("test.html"));
    assert_eq!(resolution.extension(), None);
    assert_eq!(resolution.path_info(), "/more");
}

/// Test dotted directory and file names
#[test]
fn test_dotted_directory_with_parameter() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/.foo.bar.baz/1/.foo.bar.baz");

    assert_eq!(
        resolution.include_file(),
        doc_root.path(".foo.bar.baz/%VAR%/.foo.bar.baz.php")
    );
    assert_eq!(resolution.script_name(), "/.foo.bar.baz/1/.foo.bar.baz.php");
    assert_eq!(resolution.parameters(), ["1"]);
    assert_eq!(resolution.extension(), None);
}

/// Test an unmatched segment without a parameter directory
#[test]
fn test_unknown_segment_not_found() {
    let doc_root = DocumentRoot::new();
    let err = doc_root.prepare_err("/nope/x");

    assert_status(&err, StatusCode::NOT_FOUND);
    match err {
        TranslateError::NotFound {
            segment,
            request_path,
        } => {
            assert_eq!(segment.as_deref(), Some("nope"));
            assert_eq!(request_path, "/nope/x");
        }
        other => panic!("unexpected error: {}", other),
    }
}

/// Test an empty document root has nothing to serve
#[test]
fn test_empty_root_not_found() {
    let doc_root = DocumentRoot::empty();
    assert_status(&doc_root.prepare_err("/"), StatusCode::NOT_FOUND);
}

/// Test malformed URIs are rejected before any filesystem access
#[test]
fn test_malformed_uri_bad_request() {
    let doc_root = DocumentRoot::new();

    for uri in ["#fragment", "relative/path", "", "?q=1"] {
        assert_status(&doc_root.prepare_err(uri), StatusCode::BAD_REQUEST);
    }

    let probe = InMemoryProbe::new().with_file("/srv/www/index.php");
    let translator = PathTranslator::with_probe("/srv/www", &probe).unwrap();
    let err = translator.prepare("#/index.php").unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(probe.calls(), 0);
}

/// Test one translator serves many requests without leftover state
#[test]
fn test_translator_is_reusable() {
    let doc_root = DocumentRoot::new();
    let mut translator = doc_root.translator();
    translator.set_search_extensions(["php"]).unwrap();

    let first = translator.prepare("/categories/search.json").unwrap();
    let second = translator.prepare("/test").unwrap();
    let third = translator.prepare("/categories/5/").unwrap();

    assert_eq!(first.extension(), Some("json"));
    assert_eq!(second.extension(), None);
    assert!(second.parameters().is_empty());
    assert_eq!(third.parameters(), ["5"]);
    assert_eq!(first.extension(), Some("json"));
}

/// Test percent-decoded segments
#[test]
fn test_decode_segments() {
    let doc_root = DocumentRoot::new();
    let mut translator = doc_root.translator();
    translator.set_decode_segments(true);

    let resolution = translator.prepare("/categories/a%20b/modify").unwrap();
    assert_eq!(resolution.parameters(), ["a b"]);

    let resolution = translator.prepare("/categories/%2e%2e/test").unwrap();
    assert_eq!(resolution.include_file(), doc_root.path("test.php"));

    let err = translator.prepare("/categories/a%2Fb").unwrap_err();
    assert!(err.is_bad_request());

    // Without decoding the encoded name is a plain parameter
    let resolution = doc_root.prepare("/categories/a%20b/modify");
    assert_eq!(resolution.parameters(), ["a%20b"]);
}

/// Test the resolution serializes to JSON
#[test]
fn test_resolution_serializes() {
    let doc_root = DocumentRoot::new();
    let resolution = doc_root.prepare("/categories/1/modify/x");

    let json = serde_json::to_value(&resolution).unwrap();

    assert_eq!(json["script_name"], "/categories/1/modify.php");
    assert_eq!(json["path_parameters"][0], "1");
    assert_eq!(json["meta_variables"]["PATH_INFO"], "/x");
}
