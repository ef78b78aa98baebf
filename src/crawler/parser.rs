//! Listing page parser
//!
//! Turns a fetched page body into a queryable HTML document and reads the
//! total-page-count hint from the pagination control.

use crate::crawler::extractor::SelectorSet;
use scraper::Html;
use thiserror::Error;

/// Errors produced while parsing a page body
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The body held no markup at all
    #[error("page body is empty")]
    EmptyDocument,
}

/// Parses a fetched page body into an HTML document
///
/// Parsing is lenient: broken fragments are tolerated and surface later as
/// missing nodes rather than as errors here. Only a body with no content at
/// all is rejected.
pub fn parse_listing_page(body: &str) -> Result<Html, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    Ok(Html::parse_document(body))
}

/// Reads the last-page number from the pagination control
///
/// The upstream control lists page links with the last page number as the
/// second-to-last anchor. Returns `fallback` when the control is missing or
/// its text does not parse as a positive number: the crawl must always end
/// up with a bounded, deterministic page range, even when the page
/// structure changes unexpectedly.
pub fn extract_max_page_hint(document: &Html, selectors: &SelectorSet, fallback: u32) -> u32 {
    let anchors: Vec<String> = document
        .select(&selectors.pagination)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .collect();

    let hint = anchors
        .len()
        .checked_sub(2)
        .and_then(|i| anchors.get(i))
        .and_then(|text| text.parse::<u32>().ok())
        .filter(|pages| *pages >= 1);

    match hint {
        Some(pages) => pages,
        None => {
            tracing::warn!(
                fallback,
                "pagination hint missing or unparsable, using fallback bound"
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;

    fn selectors() -> SelectorSet {
        SelectorSet::compile(&SelectorConfig::default()).unwrap()
    }

    fn pagination_page(anchors: &[&str]) -> Html {
        let links: String = anchors
            .iter()
            .map(|a| format!(r##"<a href="#">{}</a>"##, a))
            .collect();
        Html::parse_document(&format!(
            r#"<html><body><div class="pagination-parts">{}</div></body></html>"#,
            links
        ))
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert_eq!(parse_listing_page("   \n "), Err(ParseError::EmptyDocument));
    }

    #[test]
    fn test_broken_markup_is_tolerated() {
        assert!(parse_listing_page("<div><span>half open").is_ok());
    }

    #[test]
    fn test_hint_from_second_to_last_anchor() {
        let document = pagination_page(&["1", "2", "3", "17", "Next"]);
        assert_eq!(extract_max_page_hint(&document, &selectors(), 100), 17);
    }

    #[test]
    fn test_missing_control_falls_back() {
        let document = Html::parse_document("<html><body><p>no pager here</p></body></html>");
        assert_eq!(extract_max_page_hint(&document, &selectors(), 100), 100);
    }

    #[test]
    fn test_unparsable_hint_falls_back() {
        let document = pagination_page(&["1", "2", "last", "Next"]);
        assert_eq!(extract_max_page_hint(&document, &selectors(), 100), 100);
    }

    #[test]
    fn test_single_anchor_falls_back() {
        let document = pagination_page(&["Next"]);
        assert_eq!(extract_max_page_hint(&document, &selectors(), 42), 42);
    }

    #[test]
    fn test_fallback_is_configurable() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_max_page_hint(&document, &selectors(), 7), 7);
    }
}
