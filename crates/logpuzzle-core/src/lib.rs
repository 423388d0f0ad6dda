pub mod config;
pub mod logging;

pub mod extract;
pub mod fetch;
pub mod gallery;
pub mod retry;
pub mod source;
pub mod storage;
