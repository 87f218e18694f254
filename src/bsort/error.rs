use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::io_error_msg;

#[derive(Debug, Error)]
pub enum BsortError {
    /// Missing or inconsistent options. Nothing has been touched.
    #[error("{0}")]
    Usage(String),

    /// Opening, stating, mapping or flushing a file failed.
    #[error("{}: {}", .path.display(), io_error_msg(.source))]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BsortError {
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BsortError::Storage {
            path: path.into(),
            source,
        }
    }

    #[inline]
    pub fn is_usage(&self) -> bool {
        matches!(self, BsortError::Usage(_))
    }
}
