// Test doubles for the watcher's collaborators, plus a scripted local HTTP server.

use crate::config::{Config, FaultIsolation};
use crate::domain::{Enrichment, Listing, SearchQuery};
use crate::notify::{Notification, Notifier, NotifierError};
use crate::scraper::{DetailEnricher, ListingSource, ScraperError};
use crate::store::{SeenSet, SeenStore, StoreError};
use crate::watcher::Ticker;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub fn listing(city: &str, slug: &str) -> Listing {
    let url = format!("https://www.pararius.nl/appartement-te-huur/{city}/{slug}");
    Listing {
        id: url.clone(),
        title: format!("Appartement {slug}"),
        price: "€ 1.500 per maand".to_string(),
        url,
        address: format!("{slug} 1, {city}"),
        city: city.to_string(),
    }
}

pub fn config(cities: &[&str], isolation: FaultIsolation) -> Config {
    Config {
        telegram_token: "test-token".to_string(),
        chat_id: 1,
        state_file: PathBuf::from("unused.json"),
        check_interval: Duration::from_secs(600),
        queries: cities
            .iter()
            .map(|c| SearchQuery::new(*c, "0-1750", "2-slaapkamers", "sinds-1"))
            .collect(),
        isolation,
        outreach_signature: "Sam".to_string(),
    }
}

pub fn set<S: AsRef<str>>(ids: &[S]) -> SeenSet {
    ids.iter().map(|s| s.as_ref().to_string()).collect()
}

/// Serves canned search pages per city; cities in `failing` return a
/// network error.
#[derive(Default)]
pub struct FakeSource {
    pages: RefCell<HashMap<String, Vec<Listing>>>,
    failing: RefCell<HashSet<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn page(self, city: &str, listings: Vec<Listing>) -> Self {
        self.pages.borrow_mut().insert(city.to_string(), listings);
        self
    }

    pub fn fail(&self, city: &str) {
        self.failing.borrow_mut().insert(city.to_string());
    }

    pub fn recover(&self, city: &str) {
        self.failing.borrow_mut().remove(city);
    }
}

impl ListingSource for FakeSource {
    fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<Listing>, ScraperError> {
        self.calls.borrow_mut().push(query.city.clone());
        if self.failing.borrow().contains(&query.city) {
            return Err(ScraperError::Network(format!("connection reset ({})", query.city)));
        }
        Ok(self.pages.borrow().get(&query.city).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeEnricher {
    failing: RefCell<HashSet<String>>,
}

impl FakeEnricher {
    pub fn fail(&self, url: &str) {
        self.failing.borrow_mut().insert(url.to_string());
    }
}

impl DetailEnricher for FakeEnricher {
    fn fetch_enrichment(&self, listing_url: &str) -> Result<Enrichment, ScraperError> {
        if self.failing.borrow().contains(listing_url) {
            return Err(ScraperError::Status {
                status: 503,
                url: listing_url.to_string(),
            });
        }
        Ok(Enrichment {
            agency_name: "Vesteda".to_string(),
            agency_url: "https://www.pararius.nl/makelaars/vesteda".to_string(),
        })
    }
}

/// Records every delivered message; messages mentioning a string in
/// `rejecting` are refused.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<Notification>>,
    rejecting: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn reject_containing(&self, needle: &str) {
        self.rejecting.borrow_mut().push(needle.to_string());
    }

    pub fn accept_all(&self) {
        self.rejecting.borrow_mut().clear();
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn sent_mentioning(&self, needle: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|n| n.text.contains(needle))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        if self
            .rejecting
            .borrow()
            .iter()
            .any(|needle| notification.text.contains(needle.as_str()))
        {
            return Err(NotifierError::Api("400 Bad Request: chat not found".into()));
        }
        self.sent.borrow_mut().push(notification.clone());
        Ok(())
    }
}

/// In-memory store that remembers every save.
#[derive(Default)]
pub struct MemoryStore {
    initial: SeenSet,
    pub saves: RefCell<Vec<SeenSet>>,
    pub failing: Cell<bool>,
}

impl MemoryStore {
    pub fn with(initial: SeenSet) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    pub fn last_saved(&self) -> Option<SeenSet> {
        self.saves.borrow().last().cloned()
    }
}

impl SeenStore for MemoryStore {
    fn load(&self) -> SeenSet {
        self.initial.clone()
    }

    fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Io {
                path: PathBuf::from("memory"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves.borrow_mut().push(seen.clone());
        Ok(())
    }
}

/// Allows a fixed number of idle periods without actually waiting.
pub struct CountdownTicker {
    remaining: usize,
    pub waits: usize,
}

impl CountdownTicker {
    pub fn new(remaining: usize) -> Self {
        Self { remaining, waits: 0 }
    }
}

impl Ticker for CountdownTicker {
    fn wait(&mut self) -> bool {
        self.waits += 1;
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Answer exactly one HTTP request with the given status and body.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<Vec<String>>) {
    serve_sequence(&[(status, body)])
}

/// Answer one request per entry in `responses`, in order, one connection
/// each. The handle yields the request bodies that were received.
pub fn serve_sequence(responses: &[(u16, &str)]) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let responses: Vec<(u16, String)> = responses
        .iter()
        .map(|(status, body)| (*status, body.to_string()))
        .collect();

    let handle = thread::spawn(move || {
        let mut received = Vec::new();

        for (status, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut content_length = 0;
            let mut line = String::new();
            loop {
                line.clear();
                let n = reader.read_line(&mut line).expect("read request");
                if n == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().expect("content-length");
                    }
                }
            }

            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).expect("read body");
            received.push(String::from_utf8(request_body).expect("utf-8 body"));

            let content_type = if body.starts_with('{') {
                "application/json"
            } else {
                "text/html; charset=utf-8"
            };
            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");
        }

        received
    });

    (format!("http://{addr}"), handle)
}
