use crate::notify::NotifierError;
use crate::scraper::ScraperError;
use thiserror::Error;

/// Why a query, or one listing inside it, could not be processed.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("search page fetch failed: {0}")]
    Fetch(#[source] ScraperError),
    #[error("enrichment failed for {url}: {source}")]
    Enrich { url: String, source: ScraperError },
    #[error("delivery failed for {url}: {source}")]
    Deliver { url: String, source: NotifierError },
}
