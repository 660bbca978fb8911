// src/domain/listing.rs

/// Placeholder for any field the page did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// One advertised rental unit as it appears on a search results page.
///
/// `id` is the absolute listing URL. Two listings are the same listing only
/// when their URLs are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: String, // display string, e.g. "€ 1.650 per maand"
    pub url: String,
    pub address: String,
    pub city: String, // query city token, not parsed from the page
}

/// Managing agency, looked up on the listing's own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub agency_name: String,
    pub agency_url: String,
}

impl Enrichment {
    pub fn unknown() -> Self {
        Self {
            agency_name: NOT_AVAILABLE.to_string(),
            agency_url: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for Enrichment {
    fn default() -> Self {
        Self::unknown()
    }
}
