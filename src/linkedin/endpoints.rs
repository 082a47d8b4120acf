// src/linkedin/endpoints.rs
use reqwest::Url;

use crate::types::SearchQuery;

const SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";
const JOB_POSTING_PATH: &str = "/jobs-guest/jobs/api/jobPosting";
/// `f_WT=2` restricts results to remote positions
const REMOTE_WORK_TYPE: &str = "2";

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn search_url(&self, query: &SearchQuery, page_index: u32) -> String {
        let mut url = self.base.clone();
        url.set_path(SEARCH_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("keywords", &query.title)
            .append_pair("location", &query.location)
            .append_pair("start", &query.start_offset(page_index).to_string())
            .append_pair("f_TPR", query.time_filter.code())
            .append_pair("f_WT", REMOTE_WORK_TYPE);
        url.to_string()
    }

    pub fn detail_url(&self, job_id: &str) -> String {
        let mut url = self.base.clone();
        url.set_path(&format!("{}/{}", JOB_POSTING_PATH, job_id));
        url.set_query(None);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeFilter;

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("https://www.linkedin.com").unwrap())
    }

    #[test]
    fn test_search_url() {
        let query = SearchQuery {
            title: "developer".to_string(),
            location: "Spain".to_string(),
            time_filter: TimeFilter::LastDay,
            page_size: 10,
            max_pages: 30,
        };
        assert_eq!(
            endpoints().search_url(&query, 2),
            "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search?keywords=developer&location=Spain&start=20&f_TPR=r86400&f_WT=2"
        );
    }

    #[test]
    fn test_search_url_encodes_terms() {
        let query = SearchQuery {
            title: "data engineer".to_string(),
            location: "Spain".to_string(),
            time_filter: TimeFilter::LastWeek,
            page_size: 10,
            max_pages: 1,
        };
        let url = endpoints().search_url(&query, 0);
        assert!(url.contains("keywords=data+engineer"));
        assert!(url.contains("f_TPR=r604800"));
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            endpoints().detail_url("3812345678"),
            "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting/3812345678"
        );
    }
}
