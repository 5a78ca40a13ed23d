use crate::relay::RelayMessage;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// Poll attempts before the page agent gives up on a session appearing
///
/// Tunable; the bound exists to stop polling when the host page never
/// authenticates, not as a guaranteed contract.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Spacing between poll attempts
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How an in-page session credential is observed
///
/// The production probe queries the host application's auth client inside
/// the live page; tests script the poll results. `None` means no active
/// session on this attempt.
pub trait SessionProbe: Send {
    fn token(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Terminal state of a page agent run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAgentOutcome {
    /// A credential was broadcast on the channel
    Delivered,
    /// The retry budget ran out without a session ever appearing
    GaveUp,
}

/// The page-context end of the token relay
///
/// Polls its probe on a fixed interval, bounded by a retry budget, and
/// broadcasts the first credential it sees. Fire-and-forget: it never
/// waits for an acknowledgement from the other end.
pub struct PageAgent<P> {
    probe: P,
    max_attempts: u32,
    poll_interval: Duration,
}

impl<P: SessionProbe> PageAgent<P> {
    /// Create an agent with the default retry budget
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the number of poll attempts before giving up
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the spacing between poll attempts
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Poll until a credential is delivered or the budget is exhausted
    ///
    /// Giving up is silent and non-fatal: a previously stored credential
    /// stays valid, and the submit path handles absence at call time.
    pub async fn run(mut self, tx: mpsc::Sender<RelayMessage>) -> PageAgentOutcome {
        for attempt in 1..=self.max_attempts {
            if let Some(token) = self.probe.token().await {
                ::log::info!("Session credential observed on attempt {}", attempt);
                if let Err(e) = tx.send(RelayMessage::CredentialReady { token }).await {
                    ::log::warn!("Relay channel closed before delivery: {}", e);
                }
                return PageAgentOutcome::Delivered;
            }

            ::log::debug!(
                "No active session yet (attempt {} of {})",
                attempt,
                self.max_attempts
            );
            if attempt < self.max_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        ::log::info!(
            "No session appeared after {} attempts, giving up",
            self.max_attempts
        );
        PageAgentOutcome::GaveUp
    }
}
