//! Extraction errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read log file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no puzzle URLs found in {}", path.display())]
    NoPuzzleUrls { path: PathBuf },

    /// Fragment matched the scan pattern but cannot be turned into a URL.
    #[error("malformed puzzle path {fragment:?}: {reason}")]
    MalformedFragment { fragment: String, reason: String },
}
