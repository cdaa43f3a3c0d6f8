mod chrome_finder;
mod collector;
mod config;
mod error;
mod profile;
mod session;
mod source;

pub use chrome_finder::ChromeFinder;
pub use collector::ResourceCollector;
pub use config::CollectorConfig;
pub use error::{Error, Result};
pub use profile::ProfileDir;
pub use session::BrowserSession;
pub use source::PageSource;

/// Launch Chrome, load `source`, collect its resource timings and shut down
pub async fn collect_page(
    config: CollectorConfig,
    source: &PageSource,
) -> Result<pagegrade_core::PageSnapshot> {
    let session = BrowserSession::launch(config).await?;

    let collected = match session.open(source).await {
        Ok(page) => ResourceCollector::new().collect(&page).await,
        Err(e) => Err(e),
    };

    // Close even when collection failed so Chrome does not outlive us
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close Chrome cleanly: {}", e);
    }

    collected
}
