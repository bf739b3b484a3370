//! Network capability injected into the pipeline.
//!
//! The pipeline only ever talks to the cluster through [`RpcConnection`],
//! and obtains one fresh connection per action from an [`RpcConnector`].

pub mod solana_rpc;

use crate::config::RpcEndpoint;
use crate::error::RpcError;
use async_trait::async_trait;
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

pub use solana_rpc::{SolanaRpcConnection, SolanaRpcConnector};

#[async_trait]
pub trait RpcConnection: Send + Sync {
    fn url(&self) -> &str;

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError>;

    /// `Ok(None)` when the account does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError>;

    /// Submit once and wait for the configured commitment. Never retried by
    /// the pipeline.
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, RpcError>;
}

/// Builds a connection for a resolved endpoint.
pub trait RpcConnector: Send + Sync {
    fn connect(
        &self,
        endpoint: &RpcEndpoint,
        commitment: CommitmentConfig,
    ) -> Result<Box<dyn RpcConnection>, RpcError>;
}
