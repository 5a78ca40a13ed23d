use crate::extractor::FieldExtractor;
use crate::record::ScrapedJobRecord;
use crate::relay::SessionProbe;
use fantoccini::{Client, ClientBuilder};
use thiserror::Error;

/// Failures while capturing the active page
///
/// All of them render as the status string shown to the user; none of
/// them crash the invoking surface.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Could not reach a browser session: {0}")]
    NoSession(String),

    #[error("Browser command failed: {0}")]
    Driver(String),

    /// The page yielded no position title; such a capture is defined as
    /// not actionable and must not be submitted
    #[error("Could not detect job details. Ensure you are on a job page.")]
    NotJobPage,
}

/// Connects to the WebDriver session driving the user's browser
///
/// Tries the configured URL first, then a couple of common local driver
/// ports, so a default setup works without configuration.
pub async fn connect(webdriver_url: &str) -> Result<Client, CaptureError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::warn!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444", // IP instead of localhost
    ];

    for url in fallback_urls.iter().filter(|u| **u != webdriver_url) {
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    Err(CaptureError::NoSession(format!(
        "no WebDriver server reachable at {} or common fallback ports",
        webdriver_url
    )))
}

/// Runs the field extractor against the session's active page
pub struct ScrapeInvoker {
    extractor: FieldExtractor,
}

impl ScrapeInvoker {
    pub fn new(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    /// Capture a job record from whatever page the session is showing
    ///
    /// A capture whose position is the sentinel is a soft failure: the
    /// record is withheld and a descriptive error is returned instead.
    pub async fn capture(&self, client: &Client) -> Result<ScrapedJobRecord, CaptureError> {
        let url = client
            .current_url()
            .await
            .map_err(|e| CaptureError::Driver(e.to_string()))?;

        let html = client
            .source()
            .await
            .map_err(|e| CaptureError::Driver(e.to_string()))?;

        ::log::debug!("Captured {} bytes of page source from {}", html.len(), url);
        let record = self.extractor.extract(&html, url.as_str());

        if !record.is_actionable() {
            return Err(CaptureError::NotJobPage);
        }

        ::log::info!("Scraped: {} at {}", record.position, record.company);
        Ok(record)
    }
}

/// Queries the dashboard's auth client inside the live page
///
/// Runs in the page's own script context via the WebDriver session, the
/// only place `window.Clerk` exists. The callback resolves to the session
/// token, or null when no session is active yet.
const SESSION_TOKEN_SCRIPT: &str = r#"
const done = arguments[arguments.length - 1];
if (window.Clerk && window.Clerk.session) {
    window.Clerk.session.getToken().then(done).catch(() => done(null));
} else {
    done(null);
}
"#;

/// Production session probe for the token relay
pub struct ClerkSessionProbe {
    client: Client,
}

impl ClerkSessionProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl SessionProbe for ClerkSessionProbe {
    async fn token(&mut self) -> Option<String> {
        match self
            .client
            .execute_async(SESSION_TOKEN_SCRIPT, Vec::new())
            .await
        {
            Ok(value) => value
                .as_str()
                .map(str::to_string)
                .filter(|t| !t.is_empty()),
            Err(e) => {
                ::log::warn!("Session probe script failed: {}", e);
                None
            }
        }
    }
}
