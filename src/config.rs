use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::DEFAULT_DIFFICULTY;
use crate::error::ConfigError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_PEER_TIMEOUT_MS: u64 = 5_000;

/// Node settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Base URL peers use to reach this node.
    pub node_url: String,
    pub difficulty: u32,
    pub peer_timeout: Duration,
    pub bootstrap_peers: Vec<String>,
}

impl NodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", DEFAULT_PORT)?;
        let node_url = env::var("NODE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let difficulty = parse_var("DIFFICULTY", DEFAULT_DIFFICULTY)?;
        let peer_timeout =
            Duration::from_millis(parse_var("PEER_TIMEOUT_MS", DEFAULT_PEER_TIMEOUT_MS)?);
        let bootstrap_peers = env::var("PEERS")
            .map(|v| split_peers(&v))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            node_url,
            difficulty,
            peer_timeout,
            bootstrap_peers,
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

fn split_peers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_peers;

    #[test]
    fn peer_list_is_trimmed() {
        assert_eq!(
            split_peers(" http://a:1/, ,http://b:2 "),
            ["http://a:1", "http://b:2"]
        );
        assert!(split_peers("").is_empty());
    }
}
