//! Request path segment parsing.
//!
//! The path is split on `/` and dot segments are resolved lexically:
//!
//! - `.` is dropped
//! - `..` removes the previously accumulated segment, or is dropped when
//!   nothing has been accumulated yet, so the walk can never climb above
//!   the document root
//!
//! The empty segment in front of the leading `/` is not part of the result.
//! A trailing `/` yields a final empty segment, which the walk uses to tell
//! `/dir/` from `/dir`.

use percent_encoding::percent_decode_str;

/// Split and normalize a request path that starts with `/`.
///
/// With `decode` set, every segment is percent-decoded before the dot rules
/// apply. Returns `None` when a decoded segment contains `/` or NUL.
pub fn parse_request_path(path: &str, decode: bool) -> Option<Vec<String>> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<String> = Vec::new();

    for raw in path.split('/') {
        let segment = if decode {
            let decoded = percent_decode_str(raw).decode_utf8_lossy();
            if decoded.contains(|c: char| c == '/' || c == '\0') {
                return None;
            }
            decoded.into_owned()
        } else {
            raw.to_string()
        };

        match segment.as_str() {
            "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    Some(segments)
}
