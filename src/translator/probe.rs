//! Filesystem lookups used by the directory walk.
//!
//! The walk only ever asks four questions about a path. They are behind
//! [`FilesystemProbe`] so the translator can run against the real disk
//! ([`StdFilesystemProbe`]) or a fixed tree ([`InMemoryProbe`]).
//!
//! Errors other than "not found" (permissions, broken links) are reported as
//! `false`, which turns them into a "no match" for that candidate.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Existence and type checks for forward-slash paths.
pub trait FilesystemProbe: Send + Sync {
    fn exists(&self, path: &str) -> bool;

    fn is_directory(&self, path: &str) -> bool;

    fn is_regular_file(&self, path: &str) -> bool;

    fn is_readable(&self, path: &str) -> bool;
}

impl<P: FilesystemProbe + ?Sized> FilesystemProbe for &P {
    #[inline]
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    #[inline]
    fn is_directory(&self, path: &str) -> bool {
        (**self).is_directory(path)
    }

    #[inline]
    fn is_regular_file(&self, path: &str) -> bool {
        (**self).is_regular_file(path)
    }

    #[inline]
    fn is_readable(&self, path: &str) -> bool {
        (**self).is_readable(path)
    }
}

/// Look up `name` inside `dir`.
///
/// Each `name.ext` is tried in the order of `extensions`, then `name` itself.
/// A candidate matches when it exists, is a regular file and is readable.
/// Returns the matched file name (not the full path).
pub fn find_file<P, S>(probe: &P, dir: &str, name: &str, extensions: &[S]) -> Option<String>
where
    P: FilesystemProbe + ?Sized,
    S: AsRef<str>,
{
    extensions
        .iter()
        .map(|ext| format!("{}.{}", name, ext.as_ref()))
        .chain(std::iter::once(name.to_string()))
        .find(|candidate| is_includable(probe, &format!("{}/{}", dir, candidate)))
}

#[inline]
fn is_includable<P: FilesystemProbe + ?Sized>(probe: &P, path: &str) -> bool {
    probe.exists(path) && probe.is_regular_file(path) && probe.is_readable(path)
}

// =============================================================================
// Real filesystem
// =============================================================================

/// Probe backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystemProbe;

impl FilesystemProbe for StdFilesystemProbe {
    #[inline]
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    #[inline]
    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    #[inline]
    fn is_regular_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    #[cfg(unix)]
    fn is_readable(&self, path: &str) -> bool {
        let Ok(c_path) = std::ffi::CString::new(path) else {
            return false;
        };
        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        unsafe { libc::access(c_path.as_ptr(), libc::R_OK) == 0 }
    }

    #[cfg(not(unix))]
    fn is_readable(&self, path: &str) -> bool {
        std::fs::File::open(path).is_ok()
    }
}

// =============================================================================
// In-memory tree
// =============================================================================

/// Probe over a fixed set of directories and files.
///
/// Paths are compared after collapsing repeated `/` and dropping a trailing
/// `/`, the way a real filesystem resolves them. Registering a file also
/// registers all of its parent directories. Every probe call is counted.
#[derive(Debug, Default)]
pub struct InMemoryProbe {
    directories: HashSet<String>,
    /// File path -> readable.
    files: HashMap<String, bool>,
    calls: AtomicUsize,
}

impl InMemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory and its parents.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.add_ancestors(&normalize(path), true);
        self
    }

    /// Register a readable regular file and its parent directories.
    pub fn with_file(self, path: &str) -> Self {
        self.with_file_mode(path, true)
    }

    /// Register a regular file that exists but cannot be read.
    pub fn with_unreadable_file(self, path: &str) -> Self {
        self.with_file_mode(path, false)
    }

    fn with_file_mode(mut self, path: &str, readable: bool) -> Self {
        let path = normalize(path);
        self.add_ancestors(&path, false);
        self.files.insert(path, readable);
        self
    }

    fn add_ancestors(&mut self, path: &str, include_self: bool) {
        let mut current = Path::new(path);
        if include_self {
            self.directories.insert(path.to_string());
        }
        while let Some(parent) = current.parent() {
            if let Some(parent_str) = parent.to_str().filter(|p| !p.is_empty()) {
                self.directories.insert(parent_str.to_string());
            }
            current = parent;
        }
    }

    /// Number of probe calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    #[inline]
    fn record(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl FilesystemProbe for InMemoryProbe {
    fn exists(&self, path: &str) -> bool {
        self.record();
        let path = normalize(path);
        self.directories.contains(&path) || self.files.contains_key(&path)
    }

    fn is_directory(&self, path: &str) -> bool {
        self.record();
        self.directories.contains(&normalize(path))
    }

    fn is_regular_file(&self, path: &str) -> bool {
        self.record();
        self.files.contains_key(&normalize(path))
    }

    fn is_readable(&self, path: &str) -> bool {
        self.record();
        let path = normalize(path);
        self.directories.contains(&path) || self.files.get(&path).copied().unwrap_or(false)
    }
}

fn normalize(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if path.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}
