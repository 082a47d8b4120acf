// src/utils.rs
use scraper::{ElementRef, Html, Selector};

/// First element under `document` matching `css`; an unparsable selector matches nothing
pub fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// First descendant of `element` matching `css`
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    element.select(&selector).next()
}

/// All text under `element`, concatenated as-is
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text under the first match of `css`, trimmed
pub fn trimmed_text(document: &Html, css: &str) -> Option<String> {
    select_first(document, css).map(|element| raw_text(element).trim().to_string())
}
