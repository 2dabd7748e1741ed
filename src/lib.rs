// Re-export modules
pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod loader;
pub mod output;
pub mod results;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use error::{Error, Result};
pub use results::{ScrapeReport, TitleList};
pub use session::{BrowserSession, SnapshotSession, WebDriverSession};

use std::path::PathBuf;
use url::Url;

/// Where the page comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// A live browser session over WebDriver
    WebDriver,
    /// A saved HTML page read from disk
    Snapshot(PathBuf),
}

/// Builder for one playlist scrape
pub struct PlaylistScraper {
    config: ScrapeConfig,
    source: Source,
}

impl PlaylistScraper {
    /// Create a scraper for the given playlist URL with default settings
    pub fn new(url: &str) -> Self {
        Self::with_config(ScrapeConfig::new(url))
    }

    /// Create a scraper from a full configuration
    pub fn with_config(config: ScrapeConfig) -> Self {
        Self {
            config,
            source: Source::WebDriver,
        }
    }

    /// Override the playlist URL
    pub fn with_url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    /// Run the browser with or without a window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Override the WebDriver server URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Cap the number of scroll rounds
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.config.loader.max_attempts = max_attempts;
        self
    }

    /// Override the first-content wait window
    pub fn with_page_load_timeout(mut self, seconds: u64) -> Self {
        self.config.page_load_timeout_secs = seconds;
        self
    }

    /// Read the page from a saved HTML file instead of a browser
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::Snapshot(path.into());
        self
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Opens the session, scrapes the playlist and closes the session again,
    /// whether or not the scrape succeeded.
    pub async fn run(self) -> Result<ScrapeReport> {
        let config = self.config;
        config.validate()?;

        match self.source {
            Source::WebDriver => {
                ::log::info!(
                    "Connecting to WebDriver at {} (headless: {})",
                    config.webdriver_url,
                    config.headless
                );
                let mut session =
                    WebDriverSession::connect(&config.webdriver_url, config.headless).await?;
                scrape_and_close(&mut session, &config).await
            }
            Source::Snapshot(path) => {
                ::log::info!("Reading saved page from {}", path.display());
                let mut session = SnapshotSession::from_file(&path)?;
                scrape_and_close(&mut session, &config).await
            }
        }
    }
}

/// Runs [`scrape`] and closes the session afterwards, also on error
pub async fn scrape_and_close<S: BrowserSession>(
    session: &mut S,
    config: &ScrapeConfig,
) -> Result<ScrapeReport> {
    let result = scrape(session, config).await;

    match session.close().await {
        Ok(()) => ::log::info!("Browser closed"),
        Err(e) => ::log::warn!("Failed to close browser session: {}", e),
    }

    result
}

/// Navigates to the playlist, waits for the first entries, scrolls until the
/// list stops growing, then extracts the titles.
pub async fn scrape<S: BrowserSession>(
    session: &mut S,
    config: &ScrapeConfig,
) -> Result<ScrapeReport> {
    let url = Url::parse(&config.url)
        .map_err(|e| Error::Config(format!("invalid playlist URL `{}`: {}", config.url, e)))?;
    let playlist_id = utils::playlist_id(&url);

    ::log::info!("Loading playlist: {}", url);
    session.navigate(url.as_str()).await?;

    ::log::info!("Waiting for page to load...");
    session
        .wait_until_present(&config.ready_selector, config.page_load_timeout())
        .await?;

    let load = loader::load_all(session, &config.loader).await?;
    let titles = extractor::extract_titles(session, &config.extractor).await?;

    Ok(ScrapeReport::new(config.url.clone(), playlist_id, load, titles))
}
