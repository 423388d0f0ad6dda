//! Log source: the access log path plus the host its puzzle URLs live on.
//!
//! Log files are named `<anything>_<host>` (e.g. `animal_code.google.com`);
//! the host is the second `_`-separated token of the file name. Callers can
//! also pass the host explicitly, in which case the file name is not inspected.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// File name has no second `_`-delimited token.
    #[error("cannot derive host from log file name {file_name:?}: expected <prefix>_<host>")]
    MissingHost { file_name: String },

    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
}

/// An access log together with the validated host used to rebuild absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    path: PathBuf,
    host: String,
}

impl LogSource {
    /// Derive the host from the file name of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let host = host_from_file_name(&path)?;
        Ok(Self { path, host })
    }

    /// Use `host` as given instead of reading it from the file name.
    pub fn with_host(path: impl Into<PathBuf>, host: &str) -> Result<Self, SourceError> {
        let host = validate_host(host)?;
        Ok(Self {
            path: path.into(),
            host,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `https://<host>`, with no trailing slash; fragments start with `/`.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }
}

fn host_from_file_name(path: &Path) -> Result<String, SourceError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let token = file_name.split('_').nth(1).unwrap_or("");
    if token.is_empty() {
        return Err(SourceError::MissingHost { file_name });
    }
    validate_host(token)
}

fn validate_host(raw: &str) -> Result<String, SourceError> {
    if raw.chars().any(char::is_whitespace) {
        return Err(SourceError::InvalidHost {
            host: raw.to_string(),
            source: url::ParseError::InvalidDomainCharacter,
        });
    }
    match url::Host::parse(raw) {
        Ok(host) => Ok(host.to_string()),
        Err(source) => Err(SourceError::InvalidHost {
            host: raw.to_string(),
            source,
        }),
    }
}
