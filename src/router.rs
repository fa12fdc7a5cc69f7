//! Request routing.
//!
//! Paths under `/bin/` name programs to run; everything else is a file.
//! The request path is appended to the base directory verbatim. There is no
//! normalization, so `..` segments can leave the base directory.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::BaseDirectory;

/// Request paths with this prefix are executed instead of read.
pub const EXEC_PREFIX: &str = "/bin/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Static,
    Executable,
}

/// Where a request leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    pub path: PathBuf,
}

/// Resolves `path` against `base`. Never touches the filesystem.
pub fn route(path: &str, base: &BaseDirectory) -> Target {
    let kind = if path.starts_with(EXEC_PREFIX) {
        TargetKind::Executable
    } else {
        TargetKind::Static
    };

    // Plain concatenation: Path::join would discard the base for an
    // absolute request path.
    let mut full = OsString::from(base.as_os_str());
    full.push(path);

    Target {
        kind,
        path: PathBuf::from(full),
    }
}
