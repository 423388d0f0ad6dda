//! Retry loop: run a closure until success or the policy says stop.

use crate::fetch::TransferError;

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or `policy` gives up; sleeps the backoff between attempts.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, label: &str, mut f: F) -> Result<T, TransferError>
where
    F: FnMut() -> Result<T, TransferError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(attempt, delay_ms = d.as_millis() as u64, "{}: {}; retrying", label, e);
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
