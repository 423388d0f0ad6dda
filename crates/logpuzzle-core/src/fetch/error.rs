//! Fetch error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single image transfer. Kept separate from [`FetchError`] so the
/// retry policy can classify it before it is tied to an image index.
#[derive(Debug)]
pub enum TransferError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the image file failed.
    Storage(std::io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Curl(e) => write!(f, "{}", e),
            TransferError::Http(code) => write!(f, "HTTP {}", code),
            TransferError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Curl(e) => Some(e),
            TransferError::Storage(e) => Some(e),
            TransferError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for TransferError {
    fn from(e: curl::Error) -> Self {
        TransferError::Curl(e)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot create destination directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image `index` failed; earlier images are left on disk.
    #[error("download of img{index} from {url} failed: {source}")]
    Transfer {
        index: usize,
        url: String,
        #[source]
        source: TransferError,
    },

    #[error("cannot write index page {}", path.display())]
    Index {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A download worker died without reporting a result.
    #[error("download worker failed: {0}")]
    Worker(String),
}
