// src/templates/notification.rs

use crate::domain::{Enrichment, Listing};
use crate::notify::{Notification, ParseMode};
use crate::templates::outreach::{mailto_link, outreach_body, outreach_subject};

/// Builds the chat message for a newly found listing.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    signature: String,
}

impl Composer {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }

    pub fn compose(&self, listing: &Listing, enrichment: &Enrichment) -> Notification {
        let subject = outreach_subject(listing);
        let body = outreach_body(listing, &self.signature);
        let draft_link = format!("📩 [Stuur een e-mail]({})", mailto_link(&subject, &body));

        let text = format!(
            "🏙️ [{city}]\n\
             🏠 {title}\n\
             📍 {address}\n\
             💶 {price}\n\
             🔗 {url}\n\
             📢 Agency: {agency_name}\n\
             🌐 {agency_url}\n\
             \n\
             {draft_link}",
            city = title_case(&listing.city),
            title = listing.title,
            address = listing.address,
            price = listing.price,
            url = listing.url,
            agency_name = enrichment.agency_name,
            agency_url = enrichment.agency_url,
        );

        Notification {
            text,
            parse_mode: Some(ParseMode::Markdown),
        }
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
/// `den-haag` becomes `Den-Haag`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
