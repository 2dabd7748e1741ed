pub mod snapshot;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

pub use snapshot::SnapshotSession;
pub use webdriver::WebDriverSession;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Script that scrolls the window to the bottom of the document
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.documentElement.scrollHeight);";

/// Script that clicks the element passed as the first argument
pub const CLICK_ELEMENT: &str = "arguments[0].click();";

/// The browser capabilities the loader and extractor need.
///
/// Implementations own one page for their whole lifetime. Calls are issued
/// strictly one after another.
#[async_trait]
pub trait BrowserSession: Send {
    /// Handle to one element on the current page
    type Element: Send + Sync;

    /// Open a URL in the session
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Run a script in the page, passing `args` as `arguments[..]`
    async fn execute_script(
        &mut self,
        script: &str,
        args: &[&Self::Element],
    ) -> Result<serde_json::Value>;

    /// Wait until `selector` matches something, failing with
    /// [`Error::PageLoadTimeout`](crate::Error::PageLoadTimeout) after `timeout`
    async fn wait_until_present(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// All elements matching a CSS selector, in document order
    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Self::Element>>;

    /// The first element matching a CSS selector, or `None` if there is none
    async fn find_element(&mut self, selector: &str) -> Result<Option<Self::Element>>;

    /// Value of an attribute, `None` when it is not set
    async fn attribute(&mut self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Rendered text of an element
    async fn text(&mut self, element: &Self::Element) -> Result<String>;

    /// Whether the element is displayed
    async fn is_visible(&mut self, element: &Self::Element) -> Result<bool>;

    /// End the session. Safe to call once at the end of a run, including after errors.
    async fn close(&mut self) -> Result<()>;
}
