//! Cluster configuration: which RPC endpoint to talk to and at which
//! commitment level to wait for confirmation.

pub mod env;

use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::OnceLock;
use tracing::{info, warn};

pub use env::{DEFAULT_COMMITMENT, DEFAULT_RPC_URL};

/// Process-wide defaults for every action.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Default HTTP RPC endpoint
    pub rpc_url: String,
    /// Commitment at which a submitted transaction counts as landed
    pub commitment: CommitmentConfig,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl MosaicConfig {
    /// Load configuration from environment variables (and `.env`, if any).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let rpc_url = env::solana::rpc_url();
        let commitment = parse_commitment(&env::solana::commitment_level());

        info!(
            rpc_url = %rpc_url,
            commitment = ?commitment.commitment,
            "Mosaic configuration loaded"
        );

        Self {
            rpc_url,
            commitment,
        }
    }

    /// Endpoint for one action: the caller's override if it is non-blank,
    /// otherwise the configured default.
    pub fn endpoint_for(&self, rpc_override: Option<&str>) -> RpcEndpoint {
        match rpc_override.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => RpcEndpoint::from_http_url(url),
            None => RpcEndpoint::from_http_url(&self.rpc_url),
        }
    }
}

/// The HTTP endpoint one action talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub http_url: String,
}

impl RpcEndpoint {
    pub fn from_http_url(url: &str) -> Self {
        Self {
            http_url: url.to_string(),
        }
    }
}

/// Parse a commitment name, falling back to `confirmed` for unknown input.
pub fn parse_commitment(level: &str) -> CommitmentConfig {
    level
        .trim()
        .to_ascii_lowercase()
        .parse::<CommitmentConfig>()
        .unwrap_or_else(|_| {
            warn!(commitment = level, "Unknown commitment level, using confirmed");
            CommitmentConfig::confirmed()
        })
}

static MOSAIC_CONFIG: OnceLock<MosaicConfig> = OnceLock::new();

/// Install the process-wide configuration. Returns `false` if one was
/// already installed (explicitly or by a prior [`global_config`] call).
pub fn init_config(config: MosaicConfig) -> bool {
    MOSAIC_CONFIG.set(config).is_ok()
}

/// The process-wide configuration, loaded from the environment on first use.
pub fn global_config() -> &'static MosaicConfig {
    MOSAIC_CONFIG.get_or_init(MosaicConfig::from_env)
}
