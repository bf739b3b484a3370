use super::{RpcConnection, RpcConnector};
use crate::config::RpcEndpoint;
use crate::error::RpcError;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use tracing::debug;

/// [`RpcConnection`] backed by the nonblocking Solana RPC client.
pub struct SolanaRpcConnection {
    client: RpcClient,
    url: String,
    commitment: CommitmentConfig,
}

impl SolanaRpcConnection {
    pub fn new<U: ToString>(url: U, commitment: CommitmentConfig) -> Self {
        let url = url.to_string();
        Self {
            client: RpcClient::new_with_commitment(url.clone(), commitment),
            url,
            commitment,
        }
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }
}

#[async_trait]
impl RpcConnection for SolanaRpcConnection {
    fn url(&self) -> &str {
        &self.url
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, RpcError> {
        debug!(url = %self.url, "Submitting transaction");
        Ok(self.client.send_and_confirm_transaction(transaction).await?)
    }
}

/// Connects with [`SolanaRpcConnection`]; one client per action.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaRpcConnector;

impl RpcConnector for SolanaRpcConnector {
    fn connect(
        &self,
        endpoint: &RpcEndpoint,
        commitment: CommitmentConfig,
    ) -> Result<Box<dyn RpcConnection>, RpcError> {
        if !endpoint.http_url.starts_with("http://") && !endpoint.http_url.starts_with("https://") {
            return Err(RpcError::CustomError(format!(
                "Invalid RPC URL: {}",
                endpoint.http_url
            )));
        }
        Ok(Box::new(SolanaRpcConnection::new(
            &endpoint.http_url,
            commitment,
        )))
    }
}
