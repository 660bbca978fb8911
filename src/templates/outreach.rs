// src/templates/outreach.rs

use crate::domain::Listing;

pub fn outreach_subject(listing: &Listing) -> String {
    format!("Aanvraag voor {} - {}", listing.title, listing.address)
}

pub fn outreach_body(listing: &Listing, signature: &str) -> String {
    format!(
        "Geachte heer/mevrouw,

Graag reageer ik op de woning aan {address}. Ik ben erg geïnteresseerd in de woning en kan per direct intrekken.

Graag stel ik mij kort voor:
• Ik ben niet-roker, rustig en hecht veel waarde aan een schoon en verzorgd woonklimaat.
• Ik zoek een stabiele en langdurige woonruimte.
• Ik voldoe aan de inkomenseisen en kan desgewenst alle benodigde documenten aanleveren, waaronder inkomensverklaringen en een identiteitsbewijs.

Ik ben zeer gemotiveerd om deze woning te huren en maak graag op korte termijn een afspraak voor een bezichtiging.

Bij voorbaat hartelijk dank voor uw overweging. Ik kijk uit naar uw reactie.

Met vriendelijke groet,
{signature}
",
        address = listing.address,
    )
}

/// `mailto:` link with subject and body pre-filled. The recipient is left
/// blank so it can be filled in by hand in the mail client.
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
