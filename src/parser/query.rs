use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First descendant of `scope` matching `css`.
pub fn first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>, ParseError> {
    scope
        .select(&selector(css))
        .next()
        .ok_or(ParseError::MissingElement { selector: css })
}

/// Every descendant of `scope` matching `css`, in document order.
pub fn all<'a>(scope: ElementRef<'a>, css: &'static str) -> Vec<ElementRef<'a>> {
    scope.select(&selector(css)).collect()
}

/// Every element in the document matching `css`, in document order.
pub fn all_in<'a>(doc: &'a Html, css: &'static str) -> Vec<ElementRef<'a>> {
    doc.select(&selector(css)).collect()
}

/// First element anywhere in the document whose `id` equals `id` exactly.
///
/// Ids are compared as plain strings rather than spliced into a CSS selector,
/// so fragments with quotes or other selector syntax still match.
pub fn by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.select(&selector("[id]"))
        .find(|el| el.value().id() == Some(id))
}

pub fn attr<'a>(
    el: ElementRef<'a>,
    css: &'static str,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    el.value().attr(name).ok_or(ParseError::MissingAttr {
        selector: css,
        attr: name,
    })
}
