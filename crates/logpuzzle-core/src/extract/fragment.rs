//! Scanning log text for puzzle path fragments.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// `GET <token containing "puzzle"> HTTP`; `\S` keeps a match inside one request line.
const PUZZLE_REQUEST: &str = r"GET \S+puzzle\S+ HTTP";

fn puzzle_request() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PUZZLE_REQUEST).expect("puzzle request pattern is valid"))
}

/// Returns every distinct puzzle path requested in `text`, in first-seen order.
pub fn scan_fragments(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for m in puzzle_request().find_iter(text) {
        let fragment = &m.as_str()["GET ".len()..m.as_str().len() - " HTTP".len()];
        if seen.insert(fragment) {
            out.push(fragment.to_string());
        }
    }
    out
}
