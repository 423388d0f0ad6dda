//! Ordered image fetcher.
//!
//! Every URL gets its file name (`img0`, `img1`, ...) from its position in the
//! input before any download starts, so output names never depend on which
//! transfer finishes first. With one worker the images are fetched strictly in
//! order; with more, a bounded thread pool pulls pre-indexed jobs from a queue.
//! The first failure stops new downloads, keeps finished files, and skips the
//! index page.

mod error;
mod pool;
mod single;

pub use error::{FetchError, TransferError};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::LogpuzzleConfig;
use crate::gallery;
use crate::retry::RetryPolicy;

/// libcurl settings applied to every image request.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from(&LogpuzzleConfig::default())
    }
}

impl From<&LogpuzzleConfig> for CurlOptions {
    fn from(cfg: &LogpuzzleConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Concurrent downloads; 0 is treated as 1.
    pub workers: usize,
    pub retry: RetryPolicy,
    pub curl: CurlOptions,
}

impl From<&LogpuzzleConfig> for FetchOptions {
    fn from(cfg: &LogpuzzleConfig) -> Self {
        Self {
            workers: cfg.workers,
            retry: cfg.retry.as_ref().map(RetryPolicy::from).unwrap_or_default(),
            curl: CurlOptions::from(cfg),
        }
    }
}

/// Progress notifications, emitted from the thread doing the download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent<'a> {
    /// About to request `url` for image `index`.
    Started { index: usize, url: &'a str },
    Finished { index: usize, bytes: u64 },
}

/// Result of a complete run: image files in order, plus the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub dir: PathBuf,
    pub images: Vec<PathBuf>,
    pub index: PathBuf,
}

/// Local file name of the `index`-th image.
pub fn image_name(index: usize) -> String {
    format!("img{}", index)
}

/// Downloads `urls` into `dest_dir` as `img0..img<N-1>` and writes `index.html`.
///
/// `progress` is called from worker threads; with more than one worker the
/// events of different images interleave.
pub fn fetch_all<F>(
    urls: &[String],
    dest_dir: &Path,
    opts: &FetchOptions,
    progress: F,
) -> Result<Gallery, FetchError>
where
    F: Fn(FetchEvent<'_>) + Sync,
{
    fs::create_dir_all(dest_dir).map_err(|e| FetchError::CreateDir {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;

    let jobs: Vec<pool::ImageJob<'_>> = urls
        .iter()
        .enumerate()
        .map(|(index, url)| pool::ImageJob {
            index,
            url: url.as_str(),
            dest: dest_dir.join(image_name(index)),
        })
        .collect();

    tracing::info!(
        count = jobs.len(),
        workers = opts.workers.max(1),
        "fetching puzzle images into {}",
        dest_dir.display()
    );
    pool::run_pool(&jobs, opts, &progress)?;

    let names: Vec<String> = (0..urls.len()).map(image_name).collect();
    let index = gallery::write_index(dest_dir, &names).map_err(|e| FetchError::Index {
        path: dest_dir.join(gallery::INDEX_FILE),
        source: e,
    })?;
    tracing::info!("wrote {}", index.display());

    Ok(Gallery {
        dir: dest_dir.to_path_buf(),
        images: jobs.into_iter().map(|j| j.dest).collect(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;

    #[test]
    fn image_names_are_zero_based() {
        assert_eq!(image_name(0), "img0");
        assert_eq!(image_name(12), "img12");
    }

    #[test]
    fn options_from_config() {
        let cfg = LogpuzzleConfig {
            workers: 3,
            connect_timeout_secs: 2,
            timeout_secs: 9,
            user_agent: "ua".to_string(),
            retry: Some(RetryConfig::default()),
        };
        let opts = FetchOptions::from(&cfg);
        assert_eq!(opts.workers, 3);
        assert_eq!(opts.retry.max_attempts, 3);
        assert_eq!(opts.curl.connect_timeout, Duration::from_secs(2));
        assert_eq!(opts.curl.timeout, Duration::from_secs(9));
        assert_eq!(opts.curl.user_agent, "ua");
    }

    #[test]
    fn no_retry_section_means_single_attempt() {
        let opts = FetchOptions::from(&LogpuzzleConfig::default());
        assert_eq!(opts.retry.max_attempts, 1);
    }

    #[test]
    fn empty_url_list_writes_empty_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let g = fetch_all(&[], &dest, &FetchOptions::default(), |_| {}).unwrap();
        assert!(g.images.is_empty());
        assert_eq!(g.index, dest.join("index.html"));
        assert!(g.index.exists());
    }

    #[test]
    fn uncreatable_destination_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let err = fetch_all(
            &["http://127.0.0.1:9/a".to_string()],
            &blocker.join("sub"),
            &FetchOptions::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::CreateDir { .. }));
    }
}
