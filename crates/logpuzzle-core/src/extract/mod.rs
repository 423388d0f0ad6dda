//! Puzzle URL extraction.
//!
//! Pipeline: read the log → scan `GET ... HTTP` fragments containing `puzzle`
//! → dedupe (first-seen order) → sort with a strategy chosen from the first
//! fragment → rebuild absolute URLs on the log's host.

mod error;
mod fragment;
mod order;
mod rebuild;

pub use error::ExtractError;
pub use fragment::scan_fragments;
pub use order::SortStrategy;
pub use rebuild::rebuild_url;

use std::fs;

use crate::source::LogSource;

/// Ordered puzzle URLs for one log, plus the naming convention they were sorted by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleUrls {
    pub strategy: SortStrategy,
    pub urls: Vec<String>,
}

/// Reads `source`'s log file and returns its puzzle URLs in image order.
pub fn extract(source: &LogSource) -> Result<PuzzleUrls, ExtractError> {
    let path = source.path();
    let text = fs::read(path).map_err(|e| ExtractError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    // Access logs are not guaranteed to be valid UTF-8; the pattern is ASCII.
    let text = String::from_utf8_lossy(&text);
    extract_from_str(&text, source)
}

/// Same as [`extract`] but over log text already in memory.
pub fn extract_from_str(text: &str, source: &LogSource) -> Result<PuzzleUrls, ExtractError> {
    let mut fragments = scan_fragments(text);
    let Some(first) = fragments.first() else {
        return Err(ExtractError::NoPuzzleUrls {
            path: source.path().to_path_buf(),
        });
    };

    let strategy = SortStrategy::detect(first);
    tracing::debug!(
        count = fragments.len(),
        ?strategy,
        "scanned puzzle fragments from {}",
        source.path().display()
    );
    strategy.sort(&mut fragments);

    let base = source.base_url();
    let urls = fragments
        .iter()
        .map(|f| rebuild_url(&base, f))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PuzzleUrls { strategy, urls })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(path: &str) -> String {
        format!(
            "10.254.254.28 - - [06/Aug/2007:00:13:48 -0700] \"GET {} HTTP/1.0\" 302 528 \"-\" \"Mozilla/5.0\"\n",
            path
        )
    }

    #[test]
    fn slash_convention_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p_example.com");
        let log: String = ["/a/puzzle/z.jpg", "/a/puzzle/a.jpg", "/a/puzzle/m.jpg"]
            .iter()
            .map(|p| line(p))
            .collect();
        std::fs::write(&path, log).unwrap();

        let source = LogSource::from_path(&path).unwrap();
        let out = extract(&source).unwrap();
        assert_eq!(out.strategy, SortStrategy::FilenameEncoded);
        assert_eq!(
            out.urls,
            vec![
                "https://example.com/a/puzzle/a.jpg",
                "https://example.com/a/puzzle/m.jpg",
                "https://example.com/a/puzzle/z.jpg",
            ]
        );
    }

    #[test]
    fn position_encoded_sorts_by_last_dash_word() {
        let base = "/edu/languages/google-python-class/images/puzzle";
        let log: String = [
            format!("{}/p-bbjb-bbbc.jpg", base),
            format!("{}/p-baaa-bbba.jpg", base),
            format!("{}/p-bajc-bbbb.jpg", base),
        ]
        .iter()
        .map(|p| line(p))
        .collect();

        let source = LogSource::from_path("place_code.google.com").unwrap();
        let out = extract_from_str(&log, &source).unwrap();
        assert_eq!(out.strategy, SortStrategy::PositionEncoded);
        assert_eq!(
            out.urls,
            vec![
                format!("https://code.google.com{}/p-baaa-bbba.jpg", base),
                format!("https://code.google.com{}/p-bajc-bbbb.jpg", base),
                format!("https://code.google.com{}/p-bbjb-bbbc.jpg", base),
            ]
        );
    }

    #[test]
    fn dash_names_come_out_in_suffix_order() {
        let log: String = ["aaac", "aaaa", "aaab"]
            .iter()
            .map(|s| line(&format!("/~foo/puzzle-bar-{}.jpg", s)))
            .collect();
        let source = LogSource::from_path("animal_code.google.com").unwrap();
        let out = extract_from_str(&log, &source).unwrap();
        assert_eq!(
            out.urls,
            vec![
                "https://code.google.com/~foo/puzzle/puzzle-bar-aaaa.jpg",
                "https://code.google.com/~foo/puzzle/puzzle-bar-aaab.jpg",
                "https://code.google.com/~foo/puzzle/puzzle-bar-aaac.jpg",
            ]
        );
    }

    #[test]
    fn repeated_path_yields_one_url() {
        let log = [
            "/x/puzzle/cuddly1.jpg",
            "/x/puzzle/cuddly0.jpg",
            "/x/puzzle/cuddly1.jpg",
            "/x/puzzle/cuddly1.jpg",
        ]
        .iter()
        .map(|p| line(p))
        .collect::<String>();
        let source = LogSource::from_path("animal_code.google.com").unwrap();
        let out = extract_from_str(&log, &source).unwrap();
        assert_eq!(
            out.urls,
            vec![
                "https://code.google.com/x/puzzle/cuddly0.jpg",
                "https://code.google.com/x/puzzle/cuddly1.jpg",
            ]
        );
        assert!(out.urls.iter().all(|u| u.starts_with("https://code.google.com")));
    }

    #[test]
    fn absolute_form_request_is_reported_not_rebuilt() {
        let log = line("/a/puzzle/a.jpg") + &line("http://other.org/puzzle/b.jpg");
        let source = LogSource::from_path("p_example.com").unwrap();
        match extract_from_str(&log, &source).unwrap_err() {
            ExtractError::MalformedFragment { fragment, .. } => {
                assert_eq!(fragment, "http://other.org/puzzle/b.jpg")
            }
            other => panic!("expected MalformedFragment, got {:?}", other),
        }
    }

    #[test]
    fn log_without_puzzles_is_an_error() {
        let log = line("/index.html") + &line("/favicon.ico");
        let source = LogSource::from_path("animal_code.google.com").unwrap();
        assert!(matches!(
            extract_from_str(&log, &source).unwrap_err(),
            ExtractError::NoPuzzleUrls { .. }
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LogSource::from_path(dir.path().join("animal_example.com")).unwrap();
        assert!(matches!(
            extract(&source).unwrap_err(),
            ExtractError::Read { .. }
        ));
    }
}
