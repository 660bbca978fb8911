// src/domain/query.rs

pub const SEARCH_BASE_URL: &str = "https://www.pararius.nl/huurwoningen";

/// One tracked (city, price, bedrooms, recency) filter combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub city: String,
    pub price_range: String, // "min-max"
    pub bedrooms: String,    // e.g. "2-slaapkamers"
    pub recency: String,     // e.g. "sinds-1"
}

impl SearchQuery {
    pub fn new(
        city: impl Into<String>,
        price_range: impl Into<String>,
        bedrooms: impl Into<String>,
        recency: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            price_range: price_range.into(),
            bedrooms: bedrooms.into(),
            recency: recency.into(),
        }
    }

    /// Search results URL in the site's path-segment filter scheme.
    pub fn locator(&self) -> String {
        format!(
            "{SEARCH_BASE_URL}/{}/{}/{}/{}",
            self.city, self.price_range, self.bedrooms, self.recency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_follows_path_template() {
        let q = SearchQuery::new("den-haag", "0-1750", "2-slaapkamers", "sinds-1");
        assert_eq!(
            q.locator(),
            "https://www.pararius.nl/huurwoningen/den-haag/0-1750/2-slaapkamers/sinds-1"
        );
    }
}
