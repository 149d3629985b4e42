use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;
use std::time::Duration;

use super::{Announcement, PeerClient};
use crate::blockchain::ChainSnapshot;
use crate::error::PeerError;

/// Per-peer outcome of a broadcast.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FanoutReport {
    pub delivered: Vec<String>,
    pub failed: Vec<FailedPeer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedPeer {
    pub peer: String,
    pub error: String,
}

/// Best-effort concurrent calls to every peer. Each call is bounded by
/// `timeout`; one peer failing never fails the batch.
#[derive(Debug, Clone)]
pub struct PeerNetwork<C> {
    client: C,
    timeout: Duration,
}

impl<C: PeerClient> PeerNetwork<C> {
    pub fn new(client: C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn bounded<T>(
        &self,
        peer: &str,
        call: impl Future<Output = Result<T, PeerError>>,
    ) -> Result<T, PeerError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| Err(PeerError::Timeout(peer.to_string())))
    }

    /// Send `msg` to all `peers` at once and report who got it.
    pub async fn broadcast(&self, peers: &[String], msg: &Announcement) -> FanoutReport {
        let calls = peers.iter().map(|peer| async move {
            let outcome = self.bounded(peer, self.client.send(peer, msg)).await;
            (peer, outcome)
        });

        let mut report = FanoutReport::default();
        for (peer, outcome) in join_all(calls).await {
            match outcome {
                Ok(()) => report.delivered.push(peer.clone()),
                Err(e) => {
                    warn!("{} to {peer} failed: {e}", msg.route());
                    report.failed.push(FailedPeer {
                        peer: peer.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        debug!(
            "{} delivered to {}/{} peers",
            msg.route(),
            report.delivered.len(),
            peers.len()
        );
        report
    }

    /// Query every peer's chain at once. Snapshots come back in `peers`
    /// order; unreachable peers are skipped.
    pub async fn fetch_chains(&self, peers: &[String]) -> Vec<ChainSnapshot> {
        let calls = peers.iter().map(|peer| async move {
            let outcome = self.bounded(peer, self.client.fetch_chain(peer)).await;
            (peer, outcome)
        });

        join_all(calls)
            .await
            .into_iter()
            .filter_map(|(peer, outcome)| match outcome {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("skipping peer {peer} for consensus: {e}");
                    None
                }
            })
            .collect()
    }
}
