// errors.rs
use crate::config::ConfigError;
use crate::notify::NotifierError;
use crate::scraper::ScraperError;
use thiserror::Error;

/// Anything that prevents the watcher from starting. All of these end the
/// process with a non-zero exit code; once running, failures are only logged.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not build HTTP client: {0}")]
    Scraper(#[from] ScraperError),
    #[error("could not build notifier: {0}")]
    Notifier(#[from] NotifierError),
}
