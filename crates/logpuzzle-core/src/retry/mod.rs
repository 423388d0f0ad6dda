//! Retry and backoff policy for image downloads.
//!
//! The default policy makes a single attempt. Raising `max_attempts` in the
//! config retries timeouts, connection failures and 429/503/5xx responses with
//! capped exponential backoff.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
