//! Output files are written to `<name>.part` and renamed into place, so a
//! reader never sees a half-written image or index page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `<path>.part`, used until the content is complete.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

/// Renames `part` over `dest`; on failure the `.part` file is removed.
pub fn finalize(part: &Path, dest: &Path) -> io::Result<()> {
    if let Err(e) = fs::rename(part, dest) {
        let _ = fs::remove_file(part);
        return Err(e);
    }
    Ok(())
}

/// Replaces `dest` with `contents` through a `.part` file.
pub fn write_replace(dest: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let part = temp_path(dest);
    if let Err(e) = fs::write(&part, contents) {
        let _ = fs::remove_file(&part);
        return Err(e);
    }
    finalize(&part, dest)
}
