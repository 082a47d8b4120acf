// src/types.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Relative posting window understood by the search endpoint (`f_TPR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    #[default]
    LastDay,
    LastThreeDays,
    LastWeek,
}

impl TimeFilter {
    pub fn code(self) -> &'static str {
        match self {
            TimeFilter::LastDay => "r86400",
            TimeFilter::LastThreeDays => "r259200",
            TimeFilter::LastWeek => "r604800",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
    pub time_filter: TimeFilter,
    pub page_size: u32,
    pub max_pages: u32,
}

impl SearchQuery {
    /// Offset of the first result on `page_index`
    pub fn start_offset(&self, page_index: u32) -> u32 {
        page_index * self.page_size
    }
}

/// A job found on a search-results page, consumed right away to fetch its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReference {
    pub job_id: String,
    /// Outer HTML of the base card the id was read from
    pub raw_card: String,
}

/// Everything the listing extractor found on one results page.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub item_count: usize,
    pub listings: Vec<ListingReference>,
}

impl ListingPage {
    /// No list items at all: the search has run out of results.
    pub fn is_exhausted(&self) -> bool {
        self.item_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub job_id: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub time_posted: Option<String>,
    pub num_applicants: Option<String>,
    #[serde(serialize_with = "serialize_creation_date")]
    pub creation_date: NaiveDateTime,
}

fn serialize_creation_date<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(CREATION_DATE_FORMAT))
}
