//! `index.html` for a downloaded puzzle: one `<img>` per image, in order.

use std::io;
use std::path::{Path, PathBuf};

use crate::storage;

pub const INDEX_FILE: &str = "index.html";

/// Renders the page. Output depends only on `names`, so reruns are byte-identical.
pub fn render_index<S: AsRef<str>>(names: &[S]) -> String {
    let mut html = String::from("<html>\n<body>\n");
    for name in names {
        html.push_str(&format!("<img src=\"{}\">\n", name.as_ref()));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Writes `index.html` into `dir`, replacing any previous page. Returns its path.
pub fn write_index<S: AsRef<str>>(dir: &Path, names: &[S]) -> io::Result<PathBuf> {
    let path = dir.join(INDEX_FILE);
    storage::write_replace(&path, render_index(names))?;
    Ok(path)
}
