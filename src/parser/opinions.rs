use scraper::Html;
use tracing::debug;

use super::query;
use super::text::{collapse_ws, element_text};
use crate::error::ParseError;
use crate::records::OpinionRecord;

const OPINION_TAB_ID: &str = "tab-opinion";
const NAV_ITEM: &str = "li.nav-item";
const LINK: &str = "a";

/// Extract every opinion listed in the detail page's opinion tab.
///
/// Each nav entry points at an in-page fragment (`#op1234`). The record URL is
/// `case_url` with that fragment appended verbatim, so a case URL that lacks
/// the separator the fragment expects yields a malformed URL; no resolution is
/// attempted. One broken entry fails the whole page.
pub fn parse_opinions(case_url: &str, html: &str) -> Result<Vec<OpinionRecord>, ParseError> {
    let doc = Html::parse_document(html);
    let tab = query::by_id(&doc, OPINION_TAB_ID).ok_or(ParseError::MissingElement {
        selector: "#tab-opinion",
    })?;

    let mut opinions = Vec::new();
    for item in query::all(tab, NAV_ITEM) {
        let link = query::first(item, LINK)?;
        let href = query::attr(link, LINK, "href")?;
        let fragment = strip_marker(href);

        let body = query::by_id(&doc, fragment)
            .filter(|_| !fragment.is_empty())
            .ok_or_else(|| ParseError::MissingFragment {
                fragment: fragment.to_string(),
            })?;

        let title = collapse_ws(&element_text(link));
        debug!("opinion {:?} -> {}", title, href);
        opinions.push(OpinionRecord {
            url: format!("{}{}", case_url, href),
            title,
            opinion: collapse_ws(&element_text(body)),
        });
    }

    Ok(opinions)
}

/// Drop the leading `#` (or whatever single character leads the reference).
fn strip_marker(href: &str) -> &str {
    let mut chars = href.chars();
    chars.next();
    chars.as_str()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const CASE_URL: &str = "https://supreme.justia.com/cases/federal/us/410/113/";

    #[test]
    fn single_entry() {
        let html = r##"<html><body>
            <div id="tab-opinion">
              <ul><li class="nav-item"><a href="#op1">Syllabus
              </a></li></ul>
            </div>
            <div id="op1">This is   the opinion.</div>
        </body></html>"##;
        let ops = parse_opinions(CASE_URL, html).unwrap();
        assert_eq!(
            ops,
            vec![OpinionRecord {
                url: format!("{}#op1", CASE_URL),
                title: "Syllabus".into(),
                opinion: "This is the opinion.".into(),
            }]
        );
    }

    #[test]
    fn url_is_plain_concatenation() {
        let html = r##"<div id="tab-opinion"><li class="nav-item"><a href="#x">t</a></li></div>
            <p id="x">body</p>"##;
        let ops = parse_opinions("https://example.com/case", html).unwrap();
        assert_eq!(ops[0].url, "https://example.com/case#x");
    }

    #[test]
    fn fixture_page_keeps_entry_order() {
        let html = std::fs::read_to_string("tests/fixtures/case_410_113.html").unwrap();
        let ops = parse_opinions(CASE_URL, &html).unwrap();
        let titles: Vec<&str> = ops.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["Syllabus", "Opinion (Blackmun)", "Dissent (Rehnquist)"]);
        assert_eq!(ops[1].url, format!("{}#opinion-1", CASE_URL));
        assert!(ops[1].opinion.starts_with("MR. JUSTICE BLACKMUN delivered the opinion"));
        assert!(ops.iter().all(|o| !o.opinion.contains("  ")));
    }

    #[test]
    fn empty_tab_yields_nothing() {
        let html = r#"<div id="tab-opinion"><ul></ul></div>"#;
        assert!(parse_opinions(CASE_URL, html).unwrap().is_empty());
    }

    #[test]
    fn missing_tab_fails() {
        let err = parse_opinions(CASE_URL, "<html><body></body></html>").unwrap_err();
        assert_eq!(err, ParseError::MissingElement { selector: "#tab-opinion" });
    }

    #[test]
    fn missing_href_fails() {
        let html = r#"<div id="tab-opinion"><li class="nav-item"><a>Syllabus</a></li></div>"#;
        assert_eq!(
            parse_opinions(CASE_URL, html).unwrap_err(),
            ParseError::MissingAttr { selector: "a", attr: "href" }
        );
    }

    #[test]
    fn missing_body_aborts_whole_page() {
        let html = r##"<div id="tab-opinion">
              <li class="nav-item"><a href="#op1">One</a></li>
              <li class="nav-item"><a href="#op2">Two</a></li>
            </div>
            <div id="op1">first</div>"##;
        assert_eq!(
            parse_opinions(CASE_URL, html).unwrap_err(),
            ParseError::MissingFragment { fragment: "op2".into() }
        );
    }

    #[test]
    fn empty_href_is_missing_fragment() {
        let html = r#"<div id="tab-opinion"><li class="nav-item"><a href="">x</a></li></div>"#;
        assert_eq!(
            parse_opinions(CASE_URL, html).unwrap_err(),
            ParseError::MissingFragment { fragment: String::new() }
        );
    }
}
