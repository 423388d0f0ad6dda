//! CLI command handlers.

mod download;
mod print;

pub use download::run_download;
pub use print::run_print;
