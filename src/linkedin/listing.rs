// src/linkedin/listing.rs
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::ListingError;
use crate::types::{ListingPage, ListingReference};
use crate::utils::select_within;

pub const BASE_CARD_SELECTOR: &str = "div.base-card";
pub const ENTITY_URN_ATTR: &str = "data-entity-urn";

/// Parse a search-results page into the job references it lists.
///
/// List items without a base card are skipped silently; cards with a missing or
/// malformed urn are skipped with a warning.
pub fn extract_listings(page_body: &str) -> ListingPage {
    let document = Html::parse_document(page_body);
    let Ok(item_selector) = Selector::parse("li") else {
        return ListingPage::default();
    };

    let mut page = ListingPage::default();
    for item in document.select(&item_selector) {
        page.item_count += 1;
        match listing_from_item(item) {
            Ok(listing) => page.listings.push(listing),
            Err(ListingError::MissingBaseCard) => continue,
            Err(err) => warn!("Skipping listing: {}", err),
        }
    }
    page
}

fn listing_from_item(item: ElementRef<'_>) -> Result<ListingReference, ListingError> {
    let card = select_within(item, BASE_CARD_SELECTOR).ok_or(ListingError::MissingBaseCard)?;
    let job_id = job_id_from_card(card)?;
    Ok(ListingReference {
        job_id,
        raw_card: card.html(),
    })
}

pub(crate) fn job_id_from_card(card: ElementRef<'_>) -> Result<String, ListingError> {
    let urn = card
        .value()
        .attr(ENTITY_URN_ATTR)
        .ok_or(ListingError::MissingIdentifier)?;
    parse_job_id(urn)
}

/// Job id is the fourth `:`-separated segment, e.g. `urn:li:jobPosting:3812345678`
pub fn parse_job_id(urn: &str) -> Result<String, ListingError> {
    match urn.split(':').nth(3) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ListingError::MalformedIdentifier(urn.to_string())),
    }
}
