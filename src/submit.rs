use crate::record::ScrapedJobRecord;
use crate::store::CredentialStore;
use std::time::Duration;
use thiserror::Error;

/// Typed failure of one submission attempt
///
/// Every variant renders as the human-readable string shown to the user;
/// nothing here propagates past the CLI boundary as a panic.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No stored credential; the call was aborted before any network I/O
    #[error("No token found. Please connect again.")]
    NotAuthenticated,

    /// Network unreachable or timed out; the transport's message verbatim
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; server-supplied detail when the body had one
    #[error("{0}")]
    Rejected(String),

    /// The credential store itself could not be read
    #[error("storage error: {0}")]
    Store(#[from] crate::store::StoreError),
}

/// Outcome reported back to the invoking surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub error: Option<String>,
}

impl From<Result<(), SubmitError>> for SubmissionResult {
    fn from(result: Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                error: None,
            },
            Err(e) => Self {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Performs the authorized create-record call against the dashboard API
///
/// Exactly one network call per invocation, no retries; re-invoking on
/// failure is the caller's business.
pub struct SubmitClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmitClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// The create endpoint, tolerant of a trailing slash in the base URL
    fn endpoint(&self) -> String {
        format!("{}/applications/", self.base_url.trim_end_matches('/'))
    }

    /// POST the record with the given bearer token
    pub async fn submit(
        &self,
        record: &ScrapedJobRecord,
        token: &str,
    ) -> Result<(), SubmitError> {
        let url = self.endpoint();
        ::log::debug!("Submitting application to {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                ::log::warn!("Submission transport failure: {}", e);
                SubmitError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            // The body is the created record; nothing beyond success matters here
            ::log::info!("Application saved: {} at {}", record.position, record.company);
            return Ok(());
        }

        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail")?.as_str().map(String::from));

        let message =
            detail.unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
        ::log::warn!("Submission rejected: {}", message);
        Err(SubmitError::Rejected(message))
    }

    /// Submit using the credential currently in the store
    ///
    /// An absent credential fails before any network call is issued.
    pub async fn submit_stored(
        &self,
        record: &ScrapedJobRecord,
        store: &CredentialStore,
    ) -> SubmissionResult {
        let token = match store.token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(SubmitError::NotAuthenticated).into(),
            Err(e) => return Err(SubmitError::from(e)).into(),
        };

        self.submit(record, &token).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample_record() -> ScrapedJobRecord {
        ScrapedJobRecord::new(
            "Acme Corp".to_string(),
            "Senior Engineer".to_string(),
            "https://jobs.example.com/offer/42",
        )
    }

    /// One-shot HTTP server returning a canned response
    ///
    /// Reads the full request (headers plus content-length body) before
    /// answering so the client never sees a mid-write reset.
    async fn canned_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(header_end) = find_header_end(&request) {
                    let headers = String::from_utf8_lossy(&request[..header_end]);
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(String::from))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn find_header_end(request: &[u8]) -> Option<usize> {
        request.windows(4).position(|w| w == b"\r\n\r\n")
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let base = canned_server("201 Created", r#"{"id": 1}"#).await;
        let client = SubmitClient::new(base);

        let result = client.submit(&sample_record(), "tok-123").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_detail_is_propagated_verbatim() {
        let base = canned_server("500 Internal Server Error", r#"{"detail": "DB down"}"#).await;
        let client = SubmitClient::new(base);

        let err = client.submit(&sample_record(), "tok-123").await.unwrap_err();
        assert_eq!(err.to_string(), "DB down");
    }

    #[tokio::test]
    async fn test_unparseable_body_falls_back_to_status_message() {
        let base = canned_server("401 Unauthorized", "not json").await;
        let client = SubmitClient::new(base);

        let err = client.submit(&sample_record(), "tok-123").await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: 401");
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("store.json"));
        // A base URL nothing listens on: any network attempt would fail
        // with a transport error, not the authentication message
        let client = SubmitClient::new("http://127.0.0.1:1");

        let result = client.submit_stored(&sample_record(), &store).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("No token found. Please connect again.")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_transport_message() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("store.json"));
        store.set_token("tok-123").unwrap();
        let client = SubmitClient::new("http://127.0.0.1:1");

        let result = client.submit_stored(&sample_record(), &store).await;

        assert!(!result.success);
        let message = result.error.unwrap();
        assert_ne!(message, "No token found. Please connect again.");
        assert!(!message.is_empty());
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let with_slash = SubmitClient::new("https://example.com/");
        let without = SubmitClient::new("https://example.com");
        assert_eq!(with_slash.endpoint(), "https://example.com/applications/");
        assert_eq!(without.endpoint(), "https://example.com/applications/");
    }
}
