use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while reading, converting or writing dataset files.
///
/// Line numbers are 1-based and refer to the input file named by `path`.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "{}:{line}: expected 3 tokens (head relation tail), found {found}",
        path.display()
    )]
    Format {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{line}: empty line has no user id", path.display())]
    EmptyLine { path: PathBuf, line: usize },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{count} distinct labels exceed the u32 id space")]
    TooManyLabels { count: usize },

    /// Mappings are built from the same label sets the edges are resolved
    /// against, so this only fires on an internal bug.
    #[error("label `{label}` has no id in its mapping")]
    UnmappedLabel { label: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Like [`IngestError::io`], but a missing file is reported as
    /// [`IngestError::MissingInput`].
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            Self::io(path, source)
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
