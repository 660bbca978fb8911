mod extract;
mod scraper;
mod scraper_error;

pub use scraper::ParariusScraper;
pub use scraper_error::ScraperError;

use crate::domain::{Enrichment, Listing, SearchQuery};

/// Produces the current search results for one query.
///
/// Either the full page of listings is returned or an error; there are no
/// partial results.
pub trait ListingSource {
    fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<Listing>, ScraperError>;
}

/// Looks up supplementary fields on a listing's own page.
pub trait DetailEnricher {
    fn fetch_enrichment(&self, listing_url: &str) -> Result<Enrichment, ScraperError>;
}
