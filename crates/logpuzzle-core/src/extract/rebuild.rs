//! Rebuilding absolute image URLs from path fragments.

use super::ExtractError;

/// `base` + everything before the first `puzzle` + `puzzle/` + the file name.
///
/// `/~foo/puzzle-bar-aaab.jpg` on `https://host` becomes
/// `https://host/~foo/puzzle/puzzle-bar-aaab.jpg`.
pub fn rebuild_url(base: &str, fragment: &str) -> Result<String, ExtractError> {
    let malformed = |reason: &str| ExtractError::MalformedFragment {
        fragment: fragment.to_string(),
        reason: reason.to_string(),
    };

    if !fragment.starts_with('/') {
        return Err(malformed("not an origin-form path (must start with `/`)"));
    }
    let (prefix, _) = fragment
        .split_once("puzzle")
        .ok_or_else(|| malformed("no `puzzle` segment"))?;
    let (_, file_name) = fragment
        .rsplit_once('/')
        .ok_or_else(|| malformed("no `/` before the file name"))?;
    if file_name.is_empty() {
        return Err(malformed("empty file name"));
    }

    let rebuilt = format!("{}{}puzzle/{}", base, prefix, file_name);
    let parsed = url::Url::parse(&rebuilt).map_err(|e| malformed(&e.to_string()))?;
    let expected = url::Url::parse(base).map_err(|e| malformed(&e.to_string()))?;
    if parsed.host_str() != expected.host_str() {
        return Err(malformed("rebuilt URL leaves the log's host"));
    }
    Ok(rebuilt)
}
