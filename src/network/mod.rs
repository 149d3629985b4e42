pub mod client;
pub mod fanout;
pub mod message;

pub use client::{HttpPeerClient, PeerClient};
pub use fanout::{FanoutReport, PeerNetwork};
pub use message::Announcement;

/// Path prefix every node serves its API under.
pub const API_PREFIX: &str = "/api/v1";
