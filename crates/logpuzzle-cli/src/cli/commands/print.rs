//! Default mode: print the ordered URLs, one per line.

use anyhow::Result;
use logpuzzle_core::extract;
use logpuzzle_core::source::LogSource;
use std::io::{self, Write};

pub fn run_print(source: &LogSource) -> Result<()> {
    let found = extract::extract(source)?;
    let mut out = io::stdout().lock();
    for url in &found.urls {
        writeln!(out, "{}", url)?;
    }
    out.flush()?;
    Ok(())
}
