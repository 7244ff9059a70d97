use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while discovering manifest files
#[derive(Debug)]
pub enum FindError {
    /// The root is empty, missing, not a directory, or a read failed mid-traversal
    FileSystem {
        /// Root path the traversal was started from, verbatim
        path: PathBuf,
        /// Underlying OS error
        source: io::Error,
    },
    /// A caller-supplied argument cannot be used (e.g. a malformed glob pattern)
    InvalidArgument {
        /// The offending argument, verbatim
        argument: String,
        /// Why it was rejected
        reason: String,
    },
}

impl FindError {
    /// Build a filesystem error for a traversal rooted at `path`
    pub(crate) fn file_system(path: &Path, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Root path of the failed traversal, if this is a filesystem error
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileSystem { path, .. } => Some(path),
            Self::InvalidArgument { .. } => None,
        }
    }

    /// Whether the caller passed something unusable rather than hitting an I/O failure
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Get a short description of the error type
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::FileSystem { .. } => "File System Error",
            Self::InvalidArgument { .. } => "Invalid Argument",
        }
    }
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem { path, .. } => {
                write!(f, "Error finding files in path '{}'", path.display())
            }
            Self::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{argument}': {reason}")
            }
        }
    }
}

impl std::error::Error for FindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidArgument { .. } => None,
        }
    }
}
