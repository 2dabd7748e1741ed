use super::BrowserSession;
use crate::error::{Error, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// WebDriver capability map sent when opening a session
pub type Capabilities = serde_json::Map<String, serde_json::Value>;

/// Chrome flags used for every session
const CHROME_ARGS: [&str; 4] = [
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1920,1080",
];

/// Driver endpoints tried when the configured one refuses a connection
const FALLBACK_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A Chrome session driven over WebDriver
pub struct WebDriverSession {
    client: Client,
    closed: bool,
}

impl WebDriverSession {
    /// Connects to a WebDriver server, falling back to common driver ports
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let caps = chrome_capabilities(headless);

        match connect_with(webdriver_url, &caps).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self::from_client(client));
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            }
        }

        for url in FALLBACK_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = connect_with(url, &caps).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self::from_client(client));
            }
        }

        Err(Error::SessionSetup(format!(
            "no WebDriver server reachable at {} or the usual fallback ports; \
             make sure Chrome and chromedriver are installed and running, \
             or set the WEBDRIVER_URL environment variable",
            webdriver_url
        )))
    }

    /// Wraps an already connected client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            closed: false,
        }
    }
}

async fn connect_with(url: &str, caps: &Capabilities) -> std::result::Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps.clone());
    builder.connect(url).await.map_err(|e| e.to_string())
}

/// Builds the `goog:chromeOptions` capability for the requested window mode
pub fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut args: Vec<&str> = Vec::with_capacity(CHROME_ARGS.len() + 1);
    if headless {
        args.push("--headless");
    }
    args.extend(CHROME_ARGS);

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

/// Maps a "no such element" failure to `None`, keeping every other error
fn missing_as_none<T>(found: std::result::Result<T, CmdError>) -> Result<Option<T>> {
    match found {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn execute_script(
        &mut self,
        script: &str,
        args: &[&Element],
    ) -> Result<serde_json::Value> {
        let args = args
            .iter()
            .map(|element| serde_json::to_value(*element))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(self.client.execute(script, args).await?)
    }

    async fn wait_until_present(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let waited = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await;

        match waited {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(Error::PageLoadTimeout {
                selector: selector.to_string(),
                seconds: timeout.as_secs(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Element>> {
        Ok(self.client.find_all(Locator::Css(selector)).await?)
    }

    async fn find_element(&mut self, selector: &str) -> Result<Option<Element>> {
        missing_as_none(self.client.find(Locator::Css(selector)).await)
    }

    async fn attribute(&mut self, element: &Element, name: &str) -> Result<Option<String>> {
        Ok(element.attr(name).await?)
    }

    async fn text(&mut self, element: &Element) -> Result<String> {
        Ok(element.text().await?)
    }

    async fn is_visible(&mut self, element: &Element) -> Result<bool> {
        Ok(element.is_displayed().await?)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await?;
        Ok(())
    }
}
