// src/linkedin/detail.rs
use chrono::{Local, NaiveDateTime};
use scraper::Html;
use tracing::debug;

use super::listing::{job_id_from_card, BASE_CARD_SELECTOR};
use super::matcher::MatchFilter;
use crate::error::{ListingError, SkipReason};
use crate::language::LanguageDetector;
use crate::types::{JobRecord, ListingReference};
use crate::utils::{raw_text, select_first, trimmed_text};

const DESCRIPTION_SELECTOR: &str = "div.description__text.description__text--rich";
const TITLE_SELECTOR: &str = "h2.top-card-layout__title";
const COMPANY_SELECTOR: &str = "a.topcard__org-name-link";
const POSTED_SELECTOR: &str = "span.posted-time-ago__text";
const APPLICANTS_SELECTOR: &str = "span.num-applicants__caption";

pub fn job_title(document: &Html) -> Option<String> {
    trimmed_text(document, TITLE_SELECTOR)
}

pub fn company_name(document: &Html) -> Option<String> {
    trimmed_text(document, COMPANY_SELECTOR)
}

pub fn time_posted(document: &Html) -> Option<String> {
    trimmed_text(document, POSTED_SELECTOR)
}

pub fn num_applicants(document: &Html) -> Option<String> {
    trimmed_text(document, APPLICANTS_SELECTOR)
}

pub fn description(document: &Html) -> Option<String> {
    select_first(document, DESCRIPTION_SELECTOR).map(raw_text)
}

pub struct DetailExtractor<L> {
    detector: L,
    target_language: String,
    filter: MatchFilter,
}

impl<L: LanguageDetector> DetailExtractor<L> {
    pub fn new(detector: L, target_language: &str, filter: MatchFilter) -> Self {
        Self {
            detector,
            target_language: target_language.to_string(),
            filter,
        }
    }

    /// Build a record from the detail page if it passes the language and match checks.
    pub fn extract_and_match(
        &self,
        listing: &ListingReference,
        detail_body: &str,
        title: &str,
    ) -> Option<JobRecord> {
        match self.evaluate(listing, detail_body, title, Local::now().naive_local()) {
            Ok(record) => Some(record),
            Err(reason) => {
                debug!("Skipping job {}: {}", listing.job_id, reason);
                None
            }
        }
    }

    pub fn evaluate(
        &self,
        listing: &ListingReference,
        detail_body: &str,
        title: &str,
        now: NaiveDateTime,
    ) -> Result<JobRecord, SkipReason> {
        let job_id = revalidate_card(listing)?;
        let document = Html::parse_document(detail_body);

        let text = description(&document).ok_or(SkipReason::MissingDescription)?;

        let language = self
            .detector
            .detect(&text)
            .ok_or(SkipReason::LanguageUndetected)?;
        if language != self.target_language {
            return Err(SkipReason::LanguageMismatch {
                detected: language,
                expected: self.target_language.clone(),
            });
        }

        if !self.filter.is_match(title, &text) {
            return Err(SkipReason::NoMatch {
                title: title.to_string(),
            });
        }

        Ok(JobRecord {
            job_id,
            job_title: job_title(&document),
            company_name: company_name(&document),
            time_posted: time_posted(&document),
            num_applicants: num_applicants(&document),
            creation_date: now,
        })
    }
}

/// The base card must still carry a readable urn
fn revalidate_card(listing: &ListingReference) -> Result<String, ListingError> {
    let fragment = Html::parse_fragment(&listing.raw_card);
    let card = select_first(&fragment, BASE_CARD_SELECTOR).ok_or(ListingError::MissingBaseCard)?;
    job_id_from_card(card)
}
