pub mod page_agent;
pub mod relay_agent;

pub use page_agent::{PageAgent, PageAgentOutcome, SessionProbe};
pub use relay_agent::RelayAgent;

use crate::store::CredentialStore;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Messages crossing the page/extension isolation boundary
///
/// The schema mirrors the browser wire format: a tagged object with a
/// `type` discriminator, `{"type": "CREDENTIAL_READY", "token": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    /// A live session produced a credential
    #[serde(rename = "CREDENTIAL_READY")]
    CredentialReady { token: String },
}

/// Runs a full relay pass: page agent polling on one end, relay agent
/// persisting into the store on the other
///
/// The two agents run concurrently and communicate only through the
/// channel; the pass ends when the page agent terminates (delivered or
/// gave up) and the relay agent drains the channel.
pub async fn run_relay<P: SessionProbe>(
    page_agent: PageAgent<P>,
    store: CredentialStore,
) -> PageAgentOutcome {
    let (tx, rx) = mpsc::channel::<RelayMessage>(8);

    let relay_agent = RelayAgent::new(store);
    let (outcome, persisted) = tokio::join!(page_agent.run(tx), relay_agent.run(rx));

    ::log::debug!(
        "Relay pass finished: {:?}, {} credential(s) persisted",
        outcome,
        persisted
    );
    outcome
}
