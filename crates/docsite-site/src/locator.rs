//! Source file location.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Normalized path of the markdown source for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPath(PathBuf);

impl DocumentPath {
    /// Borrow as a filesystem path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for DocumentPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Resolves the documentation source file against a base directory.
///
/// Resolution is lexical: no filesystem access, so it cannot fail.
#[derive(Clone, Debug)]
pub struct SourceLocator {
    base_dir: PathBuf,
    relative: PathBuf,
}

impl SourceLocator {
    /// Create a locator for `relative` under `base_dir`.
    ///
    /// An absolute `relative` path is used as-is.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, relative: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            relative: relative.into(),
        }
    }

    /// Create a locator relative to the process working directory.
    ///
    /// Falls back to `.` when the working directory cannot be determined.
    #[must_use]
    pub fn from_current_dir(relative: impl Into<PathBuf>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd, relative)
    }

    /// Produce the normalized source path.
    #[must_use]
    pub fn locate(&self) -> DocumentPath {
        DocumentPath(normalize(&self.base_dir.join(&self.relative)))
    }
}

/// Remove `.` components and fold `..` into the preceding component.
///
/// `..` never climbs above the root or a leading prefix.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}
