/// Errors that can end a scrape run.
///
/// Failures while reading a single title never show up here; the extractor
/// records a placeholder for that node and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No WebDriver server accepted a session.
    #[error("could not start a browser session: {0}")]
    SessionSetup(String),

    /// The first playlist entries never appeared within the wait window.
    #[error("timed out after {seconds}s waiting for `{selector}` (the playlist might be private or unavailable)")]
    PageLoadTimeout { selector: String, seconds: u64 },

    /// A WebDriver command failed.
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// A session command failed outside of WebDriver.
    #[error("browser session command failed: {0}")]
    Session(String),

    /// A CSS selector could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
