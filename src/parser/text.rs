use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static WS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").unwrap());

/// Trim, then squeeze every run of two or more whitespace characters into a
/// single space. Lone tabs or newlines between words are left as they are.
pub fn collapse_ws(s: &str) -> String {
    WS_RUN_RE.replace_all(s.trim(), " ").into_owned()
}

/// All descendant text of an element, concatenated in document order.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
