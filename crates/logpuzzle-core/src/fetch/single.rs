//! One image: HTTP GET streamed into `<name>.part`, renamed into place on success.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::storage::{finalize, temp_path};

use super::{CurlOptions, TransferError};

/// Downloads `url` to `dest`, replacing any existing file. Returns bytes written.
pub(super) fn download_one(url: &str, dest: &Path, opts: &CurlOptions) -> Result<u64, TransferError> {
    let part = temp_path(dest);
    let result = transfer_to(url, &part, opts);
    match result {
        Ok(written) => {
            finalize(&part, dest).map_err(TransferError::Storage)?;
            Ok(written)
        }
        Err(e) => {
            let _ = fs::remove_file(&part);
            Err(e)
        }
    }
}

fn transfer_to(url: &str, part: &Path, opts: &CurlOptions) -> Result<u64, TransferError> {
    let mut file = File::create(part).map_err(TransferError::Storage)?;
    let mut written = 0u64;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        let performed = transfer.perform();
        drop(transfer);
        if let Some(e) = write_error.take() {
            return Err(TransferError::Storage(e));
        }
        performed?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }

    file.sync_all().map_err(TransferError::Storage)?;
    Ok(written)
}
