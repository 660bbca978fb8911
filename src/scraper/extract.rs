// extract.rs
//
// Selector-based extraction for pararius.nl pages. Anything optional that the
// page does not carry becomes NOT_AVAILABLE instead of an error.

use crate::domain::{Enrichment, Listing, NOT_AVAILABLE};
use crate::scraper::ScraperError;
use ::scraper::{ElementRef, Html, Selector};
use url::Url;

const ITEM: &str = "section.listing-search-item";
const ITEM_LINK: &str = "a.listing-search-item__link";
const ITEM_PRICE: &str = "div.listing-search-item__price";
const ITEM_ADDRESS: &str = "div.listing-search-item__sub-title";
const AGENT_LINK: &str = "div.agent-profile__name a";

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

/// All text nodes trimmed and concatenated, empty nodes dropped.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn first_text(item: ElementRef<'_>, sel: &Selector) -> String {
    item.select(sel)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Resolve an href against `base`; hrefs that do not parse are kept verbatim.
fn resolve(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(u) => u.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Site-relative hrefs are appended to `site_root` untouched: no
/// percent-encoding, no dot-segment removal. The result must match ids in
/// existing seen-sets byte for byte.
fn listing_url(site_root: &str, href: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        return format!("{}{href}", site_root.trim_end_matches('/'));
    }
    match Url::parse(site_root) {
        Ok(base) => resolve(&base, href),
        Err(_) => href.to_string(),
    }
}

/// Extract every listing card from a search results page, in page order.
pub fn parse_listings(html: &str, site_root: &str, city: &str) -> Result<Vec<Listing>, ScraperError> {
    let document = Html::parse_document(html);

    let item_sel = selector(ITEM)?;
    let link_sel = selector(ITEM_LINK)?;
    let price_sel = selector(ITEM_PRICE)?;
    let address_sel = selector(ITEM_ADDRESS)?;

    let mut listings = Vec::new();

    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            tracing::debug!("listing card without href, skipping");
            continue;
        };

        let url = listing_url(site_root, href);

        listings.push(Listing {
            id: url.clone(),
            title: stripped_text(link),
            price: first_text(item, &price_sel),
            url,
            address: first_text(item, &address_sel),
            city: city.to_string(),
        });
    }

    Ok(listings)
}

/// Extract the managing agency from a listing detail page.
pub fn parse_agency(html: &str, page_url: &str) -> Result<Enrichment, ScraperError> {
    let document = Html::parse_document(html);
    let agent_sel = selector(AGENT_LINK)?;

    let Some(agent) = document.select(&agent_sel).next() else {
        return Ok(Enrichment::unknown());
    };

    let agency_url = match agent.value().attr("href") {
        Some(href) => match Url::parse(page_url) {
            Ok(base) => resolve(&base, href),
            Err(_) => href.to_string(),
        },
        None => NOT_AVAILABLE.to_string(),
    };

    Ok(Enrichment {
        agency_name: stripped_text(agent),
        agency_url,
    })
}
