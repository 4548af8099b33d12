use scraper::{ElementRef, Html};
use tracing::debug;

use super::query;
use super::text::element_text;
use crate::error::ParseError;
use crate::records::CaseRecord;

const RESULT: &str = "div.search-result";
const CASE_NAME: &str = "a.case-name";
const DATE: &str = "span.to-small-font";
const CASE_URL: &str = "div.color-green";

/// Extract one `CaseRecord` per search-result block, in page order.
pub fn parse_cases(html: &str) -> Result<Vec<CaseRecord>, ParseError> {
    let doc = Html::parse_document(html);
    query::all_in(&doc, RESULT)
        .into_iter()
        .map(parse_search_result)
        .collect()
}

fn parse_search_result(result: ElementRef<'_>) -> Result<CaseRecord, ParseError> {
    let name_link = query::first(result, CASE_NAME)?;
    let case = element_text(name_link).trim().to_string();
    let docket_num = docket_from_href(query::attr(name_link, CASE_NAME, "href")?)?;

    // "Decided January 22, 1973" -> "January 22, 1973"
    let date = element_text(query::first(result, DATE)?)
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");

    let url = element_text(query::first(result, CASE_URL)?).trim().to_string();

    debug!("case {:?} docket {} ({})", case, docket_num, date);
    Ok(CaseRecord {
        case,
        docket_num,
        date,
        url,
    })
}

/// Second-to-last `/`-separated piece of a detail link. Listing hrefs end in
/// `/`, so for `/cases/federal/us/410/113/` this is `113`.
fn docket_from_href(href: &str) -> Result<String, ParseError> {
    let segments: Vec<&str> = href.split('/').collect();
    match segments.len() {
        n if n >= 2 => Ok(segments[n - 2].to_string()),
        _ => Err(ParseError::ShortHref {
            href: href.to_string(),
        }),
    }
}

// ── Tests ──
