// src/linkedin/matcher.rs
//! Decides whether a job description is worth keeping for a given search term.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::config::ScraperConfig;

/// Token that looks like a salary figure but is a US retirement plan
const RETIREMENT_PLAN_TOKEN: &str = "401k";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Description must mention the search term itself
    Keyword,
    /// Description must carry a compensation signal
    Compensation,
}

#[derive(Debug, Clone)]
pub struct MatchFilter {
    keyword_term: String,
    keyword: Regex,
    thousands: Regex,
    gross_salary: Regex,
}

impl MatchFilter {
    pub fn new(keyword_term: &str, currency_keyword: &str, gross_keyword: &str) -> Result<Self> {
        let keyword = RegexBuilder::new(&regex::escape(keyword_term))
            .case_insensitive(true)
            .build()
            .context("Failed to build keyword pattern")?;

        let thousands = RegexBuilder::new(r"\b\d+k\b")
            .case_insensitive(true)
            .build()
            .context("Failed to build thousands pattern")?;

        // `.` stops at newlines, so both words have to share a line
        let currency = regex::escape(currency_keyword);
        let gross = regex::escape(gross_keyword);
        let gross_salary = RegexBuilder::new(&format!(
            r"\b{currency}\b.*\b{gross}\b|\b{gross}\b.*\b{currency}\b"
        ))
        .case_insensitive(true)
        .build()
        .context("Failed to build gross salary pattern")?;

        Ok(Self {
            keyword_term: keyword_term.to_lowercase(),
            keyword,
            thousands,
            gross_salary,
        })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        Self::new(
            &config.keyword_term,
            &config.currency_keyword,
            &config.gross_keyword,
        )
    }

    pub fn policy_for(&self, title: &str) -> MatchPolicy {
        if title.to_lowercase() == self.keyword_term {
            MatchPolicy::Keyword
        } else {
            MatchPolicy::Compensation
        }
    }

    pub fn is_match(&self, title: &str, description: &str) -> bool {
        match self.policy_for(title) {
            MatchPolicy::Keyword => self.mentions_keyword(description),
            MatchPolicy::Compensation => {
                self.has_thousands_figure(description) || self.has_gross_salary(description)
            }
        }
    }

    pub fn mentions_keyword(&self, text: &str) -> bool {
        self.keyword.is_match(text)
    }

    /// A bare `<digits>k` token such as `35k`, other than `401k`
    pub fn has_thousands_figure(&self, text: &str) -> bool {
        self.thousands
            .find_iter(text)
            .any(|m| !m.as_str().eq_ignore_ascii_case(RETIREMENT_PLAN_TOKEN))
    }

    pub fn has_gross_salary(&self, text: &str) -> bool {
        self.gross_salary.is_match(text)
    }
}
