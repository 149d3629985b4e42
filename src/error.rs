use thiserror::Error;

/// Failure talking to a single peer. Fan-out treats any of these as
/// "peer absent for this round".
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer {0} timed out")]
    Timeout(String),

    #[error("request to peer failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("peer answered with HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
