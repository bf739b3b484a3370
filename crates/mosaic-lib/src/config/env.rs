//! Environment variable configuration
//!
//! Each function reads one variable and falls back to a documented default,
//! so callers never have to handle a missing variable themselves.

use std::env;

/// Public devnet endpoint used when nothing else is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Commitment used when `MOSAIC_COMMITMENT` is unset.
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// Solana cluster configuration from environment variables
pub mod solana {
    use super::*;

    /// RPC endpoint: `MOSAIC_RPC_URL`, then `SOLANA_RPC_URL`, then devnet.
    pub fn rpc_url() -> String {
        env::var("MOSAIC_RPC_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                env::var("SOLANA_RPC_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
    }

    /// Commitment level name for send-and-confirm.
    pub fn commitment_level() -> String {
        env::var("MOSAIC_COMMITMENT").unwrap_or_else(|_| DEFAULT_COMMITMENT.to_string())
    }
}

/// Logging configuration from environment variables
pub mod logging {
    use super::*;

    /// Get the RUST_LOG filter level
    pub fn rust_log_filter() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}
