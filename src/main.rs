use crate::config::Config;
use crate::errors::StartupError;
use crate::notify::TelegramNotifier;
use crate::scraper::ParariusScraper;
use crate::store::JsonSeenStore;
use crate::watcher::{IntervalTicker, Watcher};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod notify;
mod scraper;
mod store;
mod templates;
mod watcher;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rental_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    // 2️⃣ Configuration; missing credentials stop us here
    let config = Config::from_env()?;
    tracing::info!(
        cities = config.queries.len(),
        interval = ?config.check_interval,
        isolation = ?config.isolation,
        state_file = %config.state_file.display(),
        "configuration loaded"
    );

    // 3️⃣ Collaborators
    let scraper = ParariusScraper::new()?;
    let notifier = TelegramNotifier::new(config.telegram_token.clone(), config.chat_id)?;
    let store = JsonSeenStore::new(&config.state_file);

    // 4️⃣ Loop until SIGINT/SIGTERM; the current iteration always finishes
    let (mut ticker, stop) = IntervalTicker::new(config.check_interval);
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("shutdown requested, stopping after this iteration");
        stop.stop();
    }) {
        tracing::warn!(error = %e, "could not install signal handler");
    }

    let mut watcher = Watcher::new(&config, &scraper, &scraper, &notifier, &store);
    watcher.run(&mut ticker);

    Ok(())
}
