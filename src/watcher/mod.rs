mod poller;
mod ticker;
mod watch_error;

pub use poller::Watcher;
pub use ticker::{IntervalTicker, Ticker};
pub use watch_error::WatchError;

#[cfg(test)]
pub use poller::QueryOutcome;
