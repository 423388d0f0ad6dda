//! CLI for logpuzzle.

mod commands;

use anyhow::Result;
use clap::Parser;
use logpuzzle_core::source::LogSource;
use std::path::PathBuf;

use commands::{run_download, run_print};

/// Find puzzle image URLs in an Apache access log; print them or download them.
#[derive(Debug, Parser)]
#[command(name = "logpuzzle", version)]
#[command(about = "Extract ordered puzzle image URLs from an access log", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Apache access log. Its file name must be `<prefix>_<host>` unless --host is given.
    pub logfile: PathBuf,

    /// Download the images into DIR and write DIR/index.html instead of printing URLs.
    #[arg(short = 'd', long = "todir", value_name = "DIR")]
    pub todir: Option<PathBuf>,

    /// Host to build image URLs on, instead of deriving it from the log file name.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Download up to N images concurrently (overrides `workers` in config.toml).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn source(&self) -> Result<LogSource> {
        let source = match &self.host {
            Some(host) => LogSource::with_host(&self.logfile, host)?,
            None => LogSource::from_path(&self.logfile)?,
        };
        tracing::debug!(host = source.host(), "log source {}", source.path().display());
        Ok(source)
    }

    pub fn run(self) -> Result<()> {
        let source = self.source()?;
        match &self.todir {
            Some(dir) => run_download(&source, dir, self.jobs),
            None => run_print(&source),
        }
    }
}
