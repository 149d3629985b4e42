use std::future::Future;
use std::time::Duration;

use super::{API_PREFIX, Announcement};
use crate::blockchain::ChainSnapshot;
use crate::error::PeerError;

/// Outbound calls a node makes to one peer, addressed by base URL.
pub trait PeerClient {
    /// Fetch the peer's chain and pending pool.
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<ChainSnapshot, PeerError>>;

    /// Push `msg` to the peer; success means the peer answered 2xx.
    fn send(&self, peer: &str, msg: &Announcement) -> impl Future<Output = Result<(), PeerError>>;
}

/// JSON-over-HTTP peer client.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    http: reqwest::Client,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Result<Self, PeerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, PeerError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(PeerError::Status(status.as_u16()))
    }
}

impl PeerClient for HttpPeerClient {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<ChainSnapshot, PeerError>> {
        let url = format!("{peer}{API_PREFIX}/blockchain");
        async move {
            let resp = check_status(self.http.get(url).send().await?)?;
            Ok(resp.json::<ChainSnapshot>().await?)
        }
    }

    fn send(&self, peer: &str, msg: &Announcement) -> impl Future<Output = Result<(), PeerError>> {
        let url = format!("{peer}{API_PREFIX}{}", msg.route());
        let request = self.http.post(url).json(msg);
        async move {
            check_status(request.send().await?)?;
            Ok(())
        }
    }
}
