// scraper.rs
use crate::domain::{Enrichment, Listing, SearchQuery};
use crate::scraper::extract::{parse_agency, parse_listings};
use crate::scraper::{DetailEnricher, ListingSource, ScraperError};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

pub const SITE_ROOT: &str = "https://www.pararius.nl";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for pararius.nl search and detail pages.
pub struct ParariusScraper {
    client: Client,
}

impl ParariusScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// GET a page and return its body. Any non-2xx status is a failure.
    pub fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let start = Instant::now();

        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text()?;
        tracing::debug!(%url, bytes = text.len(), elapsed = ?start.elapsed(), "fetched page");

        Ok(text)
    }
}

impl ListingSource for ParariusScraper {
    fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<Listing>, ScraperError> {
        let locator = query.locator();
        tracing::debug!(city = %query.city, %locator, "📄 scraping search page");

        let html = self.fetch_html(&locator)?;
        parse_listings(&html, SITE_ROOT, &query.city)
    }
}

impl DetailEnricher for ParariusScraper {
    fn fetch_enrichment(&self, listing_url: &str) -> Result<Enrichment, ScraperError> {
        let html = self.fetch_html(listing_url)?;
        parse_agency(&html, listing_url)
    }
}
