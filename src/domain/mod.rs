pub mod listing;
pub mod query;

pub use listing::{Enrichment, Listing, NOT_AVAILABLE};
pub use query::SearchQuery;
