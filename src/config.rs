use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Playlist scraped when no URL is given
pub const DEFAULT_PLAYLIST_URL: &str =
    "https://www.youtube.com/playlist?list=PLN39y5i_H0FlTkHw4iOCD-OVUuf993MZn";

/// Configuration for one scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Playlist page to open
    #[serde(default = "default_url")]
    pub url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Seconds to wait for the first playlist entry to appear
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Selector that must match before loading starts
    #[serde(default = "default_ready_selector")]
    pub ready_selector: String,

    /// Scrolling behaviour
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Title lookup behaviour
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Where results are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the scroll-until-stable loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Upper bound on scroll rounds
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Consecutive unchanged rounds that count as converged
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: usize,

    /// Selector for one loaded playlist entry
    #[serde(default = "default_item_selector")]
    pub item_selector: String,

    /// Selector for the optional "load more" control
    #[serde(default = "default_load_more_selector")]
    pub load_more_selector: String,

    /// Pause after each scroll, in milliseconds
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,

    /// Pause after clicking "load more", in milliseconds
    #[serde(default = "default_load_more_delay_ms")]
    pub load_more_delay_ms: u64,
}

/// Settings for title extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Structural selectors tried in order; the first with any match wins
    #[serde(default = "default_title_selectors")]
    pub title_selectors: Vec<String>,

    /// Broad selector used when none of the structural ones match
    #[serde(default = "default_fallback_selector")]
    pub fallback_selector: String,

    /// Regex patterns for titles to drop after normalization
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Numbered, human-readable report
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// One title per line
    #[serde(default = "default_list_path")]
    pub list_path: String,

    /// Optional JSON report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
}

impl ScrapeConfig {
    /// Create a new configuration with default values
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            ready_selector: default_ready_selector(),
            loader: LoaderConfig::default(),
            extractor: ExtractorConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.loader.stagnation_limit == 0 {
            return Err(Error::Config("stagnation_limit must be at least 1".into()));
        }
        if self.loader.item_selector.trim().is_empty() {
            return Err(Error::Config("item_selector must not be empty".into()));
        }
        if self.extractor.fallback_selector.trim().is_empty() {
            return Err(Error::Config("fallback_selector must not be empty".into()));
        }
        Ok(())
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYLIST_URL)
    }
}

impl LoaderConfig {
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn load_more_delay(&self) -> Duration {
        Duration::from_millis(self.load_more_delay_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            stagnation_limit: default_stagnation_limit(),
            item_selector: default_item_selector(),
            load_more_selector: default_load_more_selector(),
            scroll_delay_ms: default_scroll_delay_ms(),
            load_more_delay_ms: default_load_more_delay_ms(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            title_selectors: default_title_selectors(),
            fallback_selector: default_fallback_selector(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            list_path: default_list_path(),
            json_path: None,
        }
    }
}

fn default_url() -> String {
    DEFAULT_PLAYLIST_URL.to_string()
}

/// WebDriver server used when neither the config nor `WEBDRIVER_URL` names one
pub const FALLBACK_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Default value for webdriver_url, taken from `WEBDRIVER_URL` when it is set
fn default_webdriver_url() -> String {
    webdriver_url_from_env(std::env::var("WEBDRIVER_URL").ok())
}

fn webdriver_url_from_env(value: Option<String>) -> String {
    value
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| FALLBACK_WEBDRIVER_URL.to_string())
}

fn default_headless() -> bool {
    true
}

fn default_page_load_timeout_secs() -> u64 {
    10
}

fn default_ready_selector() -> String {
    "ytd-playlist-video-renderer, .playlist-video".to_string()
}

/// Large enough to be unbounded for any real playlist
fn default_max_attempts() -> usize {
    1000
}

fn default_stagnation_limit() -> usize {
    5
}

fn default_item_selector() -> String {
    "ytd-playlist-video-renderer, .ytd-playlist-video-renderer".to_string()
}

fn default_load_more_selector() -> String {
    "ytd-continuation-item-renderer button, .load-more-button".to_string()
}

fn default_scroll_delay_ms() -> u64 {
    2000
}

fn default_load_more_delay_ms() -> u64 {
    3000
}

fn default_title_selectors() -> Vec<String> {
    [
        "ytd-playlist-video-renderer #video-title",
        ".ytd-playlist-video-renderer #video-title",
        "ytd-playlist-video-renderer a#video-title",
        ".ytd-playlist-video-renderer a#video-title",
        "ytd-playlist-video-renderer .title a",
        "h3 a#video-title",
        "a#video-title",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fallback_selector() -> String {
    r#"[title], [aria-label*="video"]"#.to_string()
}

fn default_report_path() -> String {
    "complete_playlist_titles.txt".to_string()
}

fn default_list_path() -> String {
    "titles_list.txt".to_string()
}
