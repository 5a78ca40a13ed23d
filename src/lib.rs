// Re-export modules
pub mod config;
pub mod extractor;
pub mod invoker;
pub mod record;
pub mod relay;
pub mod store;
pub mod submit;

// Re-export commonly used types for convenience
pub use config::ClipperConfig;
pub use record::ScrapedJobRecord;
pub use submit::SubmissionResult;

use crate::extractor::FieldExtractor;
use crate::invoker::{CaptureError, ClerkSessionProbe, ScrapeInvoker};
use crate::relay::{PageAgent, PageAgentOutcome};
use crate::store::{CredentialStore, StoreError};
use crate::submit::SubmitClient;
use std::time::Duration;
use thiserror::Error;

/// Any failure of a top-level clipper operation
///
/// Each variant carries the human-readable message shown to the user.
#[derive(Debug, Error)]
pub enum ClipperError {
    #[error("{0}")]
    Capture(#[from] CaptureError),

    #[error("{0}")]
    Submission(String),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Wires config, extractor, credential store, and submit client together
///
/// One `Clipper` per CLI invocation; each method is one of the popup-level
/// operations of the product.
pub struct Clipper {
    config: ClipperConfig,
    store: CredentialStore,
    invoker: ScrapeInvoker,
    submit: SubmitClient,
}

impl Clipper {
    /// Build a clipper from configuration
    pub fn new(mut config: ClipperConfig) -> Self {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let rules = config
            .rules
            .clone()
            .unwrap_or_else(extractor::default_rules);

        Self {
            store: CredentialStore::new(&config.store_path),
            invoker: ScrapeInvoker::new(FieldExtractor::new(rules)),
            submit: SubmitClient::new(config.api_base_url.clone()),
            config,
        }
    }

    /// The credential store this clipper reads and writes
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Scrape the active browser page into a job record
    pub async fn capture(&self) -> Result<ScrapedJobRecord, ClipperError> {
        let client = invoker::connect(&self.config.webdriver_url).await?;
        let record = self.invoker.capture(&client).await?;
        Ok(record)
    }

    /// Scrape the active page and submit the record to the dashboard
    pub async fn save(&self) -> Result<ScrapedJobRecord, ClipperError> {
        let record = self.capture().await?;

        let result = self.submit.submit_stored(&record, &self.store).await;
        if !result.success {
            let message = result.error.unwrap_or_else(|| "Generic error".to_string());
            return Err(ClipperError::Submission(message));
        }

        Ok(record)
    }

    /// Relay the dashboard session credential into the store
    ///
    /// Polls the dashboard page (which must be open in the driven browser)
    /// for a live session, then persists the token it hands out. Giving up
    /// is non-fatal; any previously stored credential stays in place.
    pub async fn connect_session(&self) -> Result<PageAgentOutcome, ClipperError> {
        let client = invoker::connect(&self.config.webdriver_url).await?;

        let agent = PageAgent::new(ClerkSessionProbe::new(client))
            .with_max_attempts(self.config.relay_max_attempts)
            .with_poll_interval(Duration::from_secs(self.config.relay_interval_secs));

        Ok(relay::run_relay(agent, self.store.clone()).await)
    }

    /// Forget the stored session credential
    pub fn logout(&self) -> Result<(), ClipperError> {
        self.store.clear_token()?;
        Ok(())
    }
}
