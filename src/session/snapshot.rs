//! Offline session over a saved playlist page.
//!
//! Useful for checking selector behaviour against a page saved from the
//! browser ("Save page as..."), without a WebDriver server. The document never
//! grows, so scrolling converges after the stagnation window.

use super::BrowserSession;
use crate::error::{Error, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Element captured from a snapshot at query time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotElement {
    attributes: HashMap<String, String>,
    text: String,
}

/// Static HTML document exposed through the session interface
pub struct SnapshotSession {
    html: String,
}

impl SnapshotSession {
    /// Creates a session over an HTML string
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Loads a saved page from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html))
    }

    // `Html` is not `Send`, so the parsed tree cannot live in the session;
    // each query parses the stored source again.
    fn select(&self, selector: &str) -> Result<Vec<SnapshotElement>> {
        let parsed = Selector::parse(selector).map_err(|e| Error::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        let doc = Html::parse_document(&self.html);

        let elements = doc
            .select(&parsed)
            .map(|node| SnapshotElement {
                attributes: node
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                text: node.text().collect::<String>(),
            })
            .collect::<Vec<_>>();

        ::log::debug!("Snapshot selector `{}` matched {} elements", selector, elements.len());
        Ok(elements)
    }
}

#[async_trait]
impl BrowserSession for SnapshotSession {
    type Element = SnapshotElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        ::log::debug!("Snapshot session ignores navigation to {}", url);
        Ok(())
    }

    async fn execute_script(
        &mut self,
        script: &str,
        _args: &[&SnapshotElement],
    ) -> Result<serde_json::Value> {
        ::log::trace!("Snapshot session skips script: {}", script);
        Ok(serde_json::Value::Null)
    }

    async fn wait_until_present(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        if self.select(selector)?.is_empty() {
            return Err(Error::PageLoadTimeout {
                selector: selector.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        Ok(())
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<SnapshotElement>> {
        self.select(selector)
    }

    async fn find_element(&mut self, selector: &str) -> Result<Option<SnapshotElement>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    async fn attribute(
        &mut self,
        element: &SnapshotElement,
        name: &str,
    ) -> Result<Option<String>> {
        Ok(element.attributes.get(name).cloned())
    }

    async fn text(&mut self, element: &SnapshotElement) -> Result<String> {
        Ok(element.text.clone())
    }

    async fn is_visible(&mut self, _element: &SnapshotElement) -> Result<bool> {
        Ok(true)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
