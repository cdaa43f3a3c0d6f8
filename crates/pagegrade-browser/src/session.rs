use crate::{ChromeFinder, CollectorConfig, Error, PageSource, ProfileDir, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A running headless Chrome plus the task that pumps its CDP messages
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    config: CollectorConfig,
    // Held so the profile directory outlives Chrome
    _profile: ProfileDir,
}

impl BrowserSession {
    /// Find Chrome and launch it with a fresh profile
    pub async fn launch(config: CollectorConfig) -> Result<Self> {
        let chrome = ChromeFinder::new(config.chrome_path.clone()).find()?;
        let profile = ProfileDir::temporary()?;

        tracing::info!("Launching Chrome from {}", chrome.display());

        let browser_config = build_browser_config(&chrome, profile.path(), &config)?;
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // The handler must be polled for any command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            config,
            _profile: profile,
        })
    }

    /// Open a new tab, load `source` into it and wait for it to settle
    pub async fn open(&self, source: &PageSource) -> Result<Page> {
        let page = self.browser.new_page("about:blank").await?;

        match source {
            PageSource::Url(url) => {
                tracing::info!("Navigating to {}", url);
                within(self.config.navigation_timeout, url, page.goto(url.as_str())).await?;
            }
            PageSource::Html(html) => {
                let what = source.describe();
                tracing::info!("Loading {}", what);
                within(self.config.navigation_timeout, &what, page.set_content(html.as_str()))
                    .await?;
            }
        }

        if !self.config.settle.is_zero() {
            tracing::debug!("Waiting {:?} for late requests", self.config.settle);
            tokio::time::sleep(self.config.settle).await;
        }

        Ok(page)
    }

    /// Close Chrome and stop the handler task
    pub async fn close(mut self) -> Result<()> {
        tracing::debug!("Closing Chrome");

        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Chrome did not exit cleanly: {}", e);
        }
        self.handler_task.abort();

        Ok(())
    }
}

/// Run a page load, failing with a timeout error once `limit` elapses
async fn within<T, E, F>(limit: Duration, what: &str, load: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<Error>,
{
    match tokio::time::timeout(limit, load).await {
        Ok(loaded) => loaded.map_err(Into::into),
        Err(_) => Err(Error::Browser(format!(
            "Timed out after {}s loading {}",
            limit.as_secs(),
            what
        ))),
    }
}

fn build_browser_config(
    chrome: &Path,
    profile: &Path,
    config: &CollectorConfig,
) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome)
        .user_data_dir(profile)
        .request_timeout(config.navigation_timeout);

    if !config.headless {
        builder = builder.with_head();
    }
    if config.no_sandbox {
        builder = builder.no_sandbox();
    }

    builder.build().map_err(Error::Browser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_launch_fails_without_chrome() {
        let config = CollectorConfig::default()
            .with_chrome_path(Some(std::path::PathBuf::from("/nonexistent/chrome")));

        let result = BrowserSession::launch(config).await;
        let err = result.err().expect("launch should fail");
        assert!(err.to_string().contains("Chrome not found"));
    }

    #[tokio::test]
    async fn test_stalled_load_times_out() {
        let stalled = std::future::pending::<Result<()>>();

        let err = within(Duration::from_millis(20), "inline HTML", stalled)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Browser error: Timed out after 0s loading inline HTML");
    }

    #[tokio::test]
    async fn test_load_error_passes_through() {
        let failed = async { Err::<(), Error>(Error::Browser("net::ERR_NAME_NOT_RESOLVED".into())) };

        let err = within(Duration::from_secs(5), "https://a.invalid/", failed)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ERR_NAME_NOT_RESOLVED"));
    }

    // Loading real pages needs a Chrome install and is left to manual runs
}
