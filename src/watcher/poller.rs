// src/watcher/poller.rs

use crate::config::{Config, FaultIsolation};
use crate::domain::{Listing, SearchQuery};
use crate::notify::Notifier;
use crate::scraper::{DetailEnricher, ListingSource};
use crate::store::{SeenSet, SeenStore};
use crate::templates::Composer;
use crate::watcher::{Ticker, WatchError};
use std::time::Instant;

/// Result of scanning one query.
#[derive(Debug)]
pub enum QueryOutcome {
    /// The page was scanned to the end. `failed` holds the listings that could
    /// not be enriched or delivered; they stay unseen and are retried next
    /// iteration.
    Completed {
        found: usize,
        notified: usize,
        failed: Vec<WatchError>,
    },
    /// Listings delivered before the failure are already in the seen set.
    Failed { notified: usize, error: WatchError },
}

impl QueryOutcome {
    pub fn notified(&self) -> usize {
        match self {
            QueryOutcome::Completed { notified, .. } | QueryOutcome::Failed { notified, .. } => *notified,
        }
    }

    pub fn is_failed(&self) -> bool {
        match self {
            QueryOutcome::Completed { failed, .. } => !failed.is_empty(),
            QueryOutcome::Failed { .. } => true,
        }
    }
}

#[derive(Debug)]
pub struct QueryReport {
    pub city: String,
    pub outcome: QueryOutcome,
}

#[derive(Debug, Default)]
pub struct IterationReport {
    pub queries: Vec<QueryReport>,
    /// A failure ended the iteration before every query ran.
    pub aborted: bool,
    pub persisted: bool,
}

impl IterationReport {
    pub fn notified(&self) -> usize {
        self.queries.iter().map(|q| q.outcome.notified()).sum()
    }

    pub fn failed_cities(&self) -> Vec<&str> {
        self.queries
            .iter()
            .filter(|q| q.outcome.is_failed())
            .map(|q| q.city.as_str())
            .collect()
    }
}

/// The polling loop: scan every query, notify what is new, persist, idle.
pub struct Watcher<'a> {
    source: &'a dyn ListingSource,
    enricher: &'a dyn DetailEnricher,
    notifier: &'a dyn Notifier,
    store: &'a dyn SeenStore,
    composer: Composer,
    queries: &'a [SearchQuery],
    isolation: FaultIsolation,
    seen: SeenSet,
}

impl<'a> Watcher<'a> {
    /// Loads the seen set from `store`; this is the only load for the
    /// lifetime of the watcher.
    pub fn new(
        config: &'a Config,
        source: &'a dyn ListingSource,
        enricher: &'a dyn DetailEnricher,
        notifier: &'a dyn Notifier,
        store: &'a dyn SeenStore,
    ) -> Self {
        Self {
            source,
            enricher,
            notifier,
            store,
            composer: Composer::new(config.outreach_signature.as_str()),
            queries: &config.queries,
            isolation: config.isolation,
            seen: store.load(),
        }
    }

    #[cfg(test)]
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Scan immediately, then once per tick until the ticker says stop.
    pub fn run(&mut self, ticker: &mut dyn Ticker) {
        tracing::info!(
            queries = self.queries.len(),
            seen = self.seen.len(),
            "🤖 Watcher started. Monitoring Pararius..."
        );

        loop {
            let start = Instant::now();
            let report = self.run_iteration();

            tracing::info!(
                notified = report.notified(),
                failed = ?report.failed_cities(),
                aborted = report.aborted,
                persisted = report.persisted,
                elapsed = ?start.elapsed(),
                "iteration finished"
            );

            if !ticker.wait() {
                break;
            }
        }

        tracing::info!("🛑 Watcher stopped");
    }

    /// One pass over every query followed by a single save of the seen set.
    pub fn run_iteration(&mut self) -> IterationReport {
        let mut report = IterationReport::default();
        let queries = self.queries;

        for query in queries {
            let outcome = self.process_query(query);

            let stop = match &outcome {
                QueryOutcome::Completed { found, notified, failed } => {
                    tracing::debug!(city = %query.city, found, notified, failed = failed.len(), "query done");
                    false
                }
                QueryOutcome::Failed { notified, error } => {
                    tracing::error!(city = %query.city, notified, error = %error, "⚠️ query failed");
                    self.isolation == FaultIsolation::PerIteration
                }
            };

            report.queries.push(QueryReport {
                city: query.city.clone(),
                outcome,
            });

            if stop {
                report.aborted = true;
                break;
            }
        }

        if report.aborted {
            tracing::warn!("iteration aborted, seen set not saved this round");
            return report;
        }

        report.persisted = match self.store.save(&self.seen) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "⚠️ could not save seen listings");
                false
            }
        };

        report
    }

    fn process_query(&mut self, query: &SearchQuery) -> QueryOutcome {
        let listings = match self.source.fetch_listings(query) {
            Ok(listings) => listings,
            Err(e) => {
                return QueryOutcome::Failed {
                    notified: 0,
                    error: WatchError::Fetch(e),
                }
            }
        };

        let found = listings.len();
        let mut notified = 0;
        let mut failed = Vec::new();

        for listing in listings {
            // also covers the same listing appearing twice on one page
            if self.seen.contains(&listing.id) {
                continue;
            }

            if let Err(error) = self.deliver(&listing) {
                if self.isolation == FaultIsolation::PerIteration {
                    return QueryOutcome::Failed { notified, error };
                }
                tracing::warn!(city = %listing.city, error = %error, "⚠️ listing skipped");
                failed.push(error);
                continue;
            }

            tracing::info!(city = %listing.city, title = %listing.title, "📢 New listing sent");
            self.seen.insert(listing.id);
            notified += 1;
        }

        QueryOutcome::Completed { found, notified, failed }
    }

    fn deliver(&self, listing: &Listing) -> Result<(), WatchError> {
        let enrichment = self
            .enricher
            .fetch_enrichment(&listing.url)
            .map_err(|source| WatchError::Enrich {
                url: listing.url.clone(),
                source,
            })?;

        let notification = self.composer.compose(listing, &enrichment);

        self.notifier
            .send(&notification)
            .map_err(|source| WatchError::Deliver {
                url: listing.url.clone(),
                source,
            })
    }
}
