//! Sequential and bounded-concurrent execution of image downloads.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Mutex};

use crate::retry::run_with_retry;

use super::single::download_one;
use super::{FetchError, FetchEvent, FetchOptions, TransferError};

/// One image with its output path fixed before dispatch.
#[derive(Debug)]
pub(super) struct ImageJob<'a> {
    pub index: usize,
    pub url: &'a str,
    pub dest: PathBuf,
}

type JobResult = (usize, Result<u64, TransferError>);

fn run_job<F>(job: &ImageJob<'_>, opts: &FetchOptions, progress: &F) -> Result<u64, TransferError>
where
    F: Fn(FetchEvent<'_>) + Sync,
{
    progress(FetchEvent::Started {
        index: job.index,
        url: job.url,
    });
    let label = format!("img{} {}", job.index, job.url);
    let bytes = run_with_retry(&opts.retry, &label, || {
        download_one(job.url, &job.dest, &opts.curl)
    })?;
    tracing::debug!(index = job.index, bytes, "saved {}", job.dest.display());
    progress(FetchEvent::Finished {
        index: job.index,
        bytes,
    });
    Ok(bytes)
}

fn transfer_failed(job: &ImageJob<'_>, e: TransferError) -> FetchError {
    tracing::error!(index = job.index, "download failed for {}: {}", job.url, e);
    FetchError::Transfer {
        index: job.index,
        url: job.url.to_string(),
        source: e,
    }
}

/// Runs every job, stopping at the first failure.
pub(super) fn run_pool<F>(jobs: &[ImageJob<'_>], opts: &FetchOptions, progress: &F) -> Result<(), FetchError>
where
    F: Fn(FetchEvent<'_>) + Sync,
{
    let workers = opts.workers.max(1).min(jobs.len());
    if workers <= 1 {
        for job in jobs {
            run_job(job, opts, progress).map_err(|e| transfer_failed(job, e))?;
        }
        return Ok(());
    }
    run_concurrent(jobs, workers, opts, progress)
}

/// Bounded worker pool. Results arrive in completion order; on failure the
/// queue is drained so no new image starts, and the lowest-index failure wins.
fn run_concurrent<F>(
    jobs: &[ImageJob<'_>],
    workers: usize,
    opts: &FetchOptions,
    progress: &F,
) -> Result<(), FetchError>
where
    F: Fn(FetchEvent<'_>) + Sync,
{
    let work: Mutex<VecDeque<&ImageJob<'_>>> = Mutex::new(jobs.iter().collect());
    let abort = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<JobResult>();

    let mut failures: Vec<(usize, TransferError)> = Vec::new();
    let mut worker_error: Option<FetchError> = None;

    std::thread::scope(|s| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let tx = tx.clone();
            let work = &work;
            let abort = &abort;
            handles.push(s.spawn(move || loop {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                let next = work.lock().ok().and_then(|mut q| q.pop_front());
                let Some(job) = next else {
                    break;
                };
                let res = run_job(job, opts, progress);
                if tx.send((job.index, res)).is_err() {
                    break;
                }
            }));
        }
        drop(tx);

        let mut to_receive = jobs.len();
        while to_receive > 0 {
            let Ok((index, res)) = rx.recv() else {
                break;
            };
            to_receive -= 1;
            if let Err(e) = res {
                abort.store(true, Ordering::Relaxed);
                let drained = work.lock().map(|mut q| q.drain(..).count()).unwrap_or(0);
                to_receive = to_receive.saturating_sub(drained);
                failures.push((index, e));
            }
        }

        for h in handles {
            if h.join().is_err() && worker_error.is_none() {
                worker_error = Some(FetchError::Worker("download worker panicked".to_string()));
            }
        }
    });

    if let Some((index, e)) = failures.into_iter().min_by_key(|(index, _)| *index) {
        return Err(transfer_failed(&jobs[index], e));
    }
    match worker_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
