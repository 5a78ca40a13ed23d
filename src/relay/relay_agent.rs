use crate::relay::RelayMessage;
use crate::store::CredentialStore;
use tokio::sync::mpsc;

/// The isolated-context end of the token relay
///
/// Subscribes to the relay channel and persists every non-empty
/// credential it receives into the durable store. It holds no state of
/// its own; the store is the sole owner of the credential.
pub struct RelayAgent {
    store: CredentialStore,
}

impl RelayAgent {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Drain the channel until the sending side closes it
    ///
    /// Returns how many credentials were persisted. Store failures are
    /// logged and skipped; a later message can still succeed.
    pub async fn run(self, mut rx: mpsc::Receiver<RelayMessage>) -> usize {
        let mut persisted = 0;

        while let Some(message) = rx.recv().await {
            match message {
                RelayMessage::CredentialReady { token } => {
                    if token.is_empty() {
                        ::log::debug!("Ignoring credential message with empty token");
                        continue;
                    }
                    match self.store.set_token(&token) {
                        Ok(()) => {
                            persisted += 1;
                            ::log::info!("Session credential synced to store");
                        }
                        Err(e) => ::log::error!("Failed to persist credential: {}", e),
                    }
                }
            }
        }

        persisted
    }
}
