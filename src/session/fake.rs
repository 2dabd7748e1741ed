//! Scripted in-memory session for pipeline tests.

use super::{BrowserSession, CLICK_ELEMENT, SCROLL_TO_BOTTOM};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub visible: bool,
    pub broken: bool,
}

impl FakeElement {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            visible: true,
            ..Self::default()
        }
    }

    pub fn with_attr(name: &str, value: &str) -> Self {
        let mut element = Self::with_text("");
        element.attributes.insert(name.to_string(), value.to_string());
        element
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::with_text("")
        }
    }
}

/// Session whose loaded-item count follows a script, one step per query
#[derive(Default)]
pub struct FakeSession {
    pub item_selector: String,
    pub counts: Vec<usize>,
    pub count_queries: usize,
    pub nodes: HashMap<String, Vec<FakeElement>>,
    pub failing_selectors: Vec<String>,
    pub load_more: Option<FakeElement>,
    pub ready: bool,
    pub scrolls: usize,
    pub clicks: usize,
    pub navigations: Vec<String>,
    pub queried: Vec<String>,
    pub closed: usize,
}

impl FakeSession {
    pub fn with_counts(item_selector: &str, counts: &[usize]) -> Self {
        Self {
            item_selector: item_selector.to_string(),
            counts: counts.to_vec(),
            ready: true,
            ..Self::default()
        }
    }

    pub fn with_nodes(selector: &str, nodes: Vec<FakeElement>) -> Self {
        let mut session = Self::with_counts("", &[]);
        session.nodes.insert(selector.to_string(), nodes);
        session
    }

    fn next_count(&mut self) -> usize {
        let count = self
            .counts
            .get(self.count_queries)
            .or_else(|| self.counts.last())
            .copied()
            .unwrap_or(0);
        self.count_queries += 1;
        count
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        Ok(())
    }

    async fn execute_script(
        &mut self,
        script: &str,
        _args: &[&FakeElement],
    ) -> Result<serde_json::Value> {
        match script {
            SCROLL_TO_BOTTOM => self.scrolls += 1,
            CLICK_ELEMENT => self.clicks += 1,
            other => return Err(Error::Session(format!("unexpected script: {other}"))),
        }
        Ok(serde_json::Value::Null)
    }

    async fn wait_until_present(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(Error::PageLoadTimeout {
                selector: selector.to_string(),
                seconds: timeout.as_secs(),
            })
        }
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<FakeElement>> {
        self.queried.push(selector.to_string());
        if self.failing_selectors.iter().any(|s| s == selector) {
            return Err(Error::Session(format!("query failed: {selector}")));
        }
        if !self.item_selector.is_empty() && selector == self.item_selector {
            let count = self.next_count();
            return Ok(vec![FakeElement::with_text("item"); count]);
        }
        Ok(self.nodes.get(selector).cloned().unwrap_or_default())
    }

    async fn find_element(&mut self, _selector: &str) -> Result<Option<FakeElement>> {
        Ok(self.load_more.clone())
    }

    async fn attribute(&mut self, element: &FakeElement, name: &str) -> Result<Option<String>> {
        if element.broken {
            return Err(Error::Session("stale element reference".to_string()));
        }
        Ok(element.attributes.get(name).cloned())
    }

    async fn text(&mut self, element: &FakeElement) -> Result<String> {
        if element.broken {
            return Err(Error::Session("stale element reference".to_string()));
        }
        Ok(element.text.clone())
    }

    async fn is_visible(&mut self, element: &FakeElement) -> Result<bool> {
        Ok(element.visible)
    }

    async fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}
