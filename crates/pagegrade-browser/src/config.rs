use std::path::PathBuf;
use std::time::Duration;

/// How Chrome is launched and how long a page gets to load
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Explicit Chrome binary; searched for when `None`
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    /// Pass `--no-sandbox` (needed when running as root in containers)
    pub no_sandbox: bool,
    /// Extra wait after load so late requests show up in the timeline
    pub settle: Duration,
    pub navigation_timeout: Duration,
}

impl CollectorConfig {
    pub fn with_chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            no_sandbox: false,
            settle: Duration::from_millis(500),
            navigation_timeout: Duration::from_secs(30),
        }
    }
}
