//! `--todir` mode: download every image and write the index page.

use anyhow::{Context, Result};
use logpuzzle_core::config;
use logpuzzle_core::extract;
use logpuzzle_core::fetch::{self, FetchEvent, FetchOptions};
use logpuzzle_core::source::LogSource;
use std::path::Path;

pub fn run_download(source: &LogSource, dest_dir: &Path, jobs: Option<usize>) -> Result<()> {
    let found = extract::extract(source)?;

    let cfg = config::load_or_init().context("load config")?;
    tracing::debug!("loaded config: {:?}", cfg);
    let mut opts = FetchOptions::from(&cfg);
    if let Some(n) = jobs {
        opts.workers = n;
    }

    let gallery = fetch::fetch_all(&found.urls, dest_dir, &opts, |ev| {
        if let FetchEvent::Started { url, .. } = ev {
            println!("Retrieving: {}", url);
        }
    })?;

    tracing::info!(
        images = gallery.images.len(),
        "gallery ready at {}",
        gallery.index.display()
    );
    Ok(())
}
