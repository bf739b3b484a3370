//! Error taxonomy for the action pipeline.
//!
//! Every variant renders to the human-readable text that ends up in
//! `ActionResult::Failure`. Chain and RPC messages are passed through as-is.

use solana_client::client_error::ClientError;
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Failures talking to the cluster.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{0}")]
    ClientError(#[from] Box<ClientError>),

    #[error("{0}")]
    CustomError(String),
}

impl From<ClientError> for RpcError {
    fn from(err: ClientError) -> Self {
        RpcError::ClientError(Box::new(err))
    }
}

/// Everything that can stop an action before it lands on chain.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The signer has no resolvable address.
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Missing or malformed option field.
    #[error("{0}")]
    Validation(String),

    /// The signer does not hold the authority the action requires.
    #[error("{0}")]
    Unauthorized(String),

    /// On-chain state rules the action out (missing extension, already
    /// paused, non-empty account, ...).
    #[error("{0}")]
    Precondition(String),

    /// The wallet refused or failed to sign.
    #[error("{0}")]
    Signing(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Failed to build instruction: {0}")]
    Instruction(#[from] ProgramError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// True for failures detected locally, before any network access.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::WalletNotConnected | Self::Validation(_) | Self::Unauthorized(_)
        )
    }
}

impl From<ClientError> for ActionError {
    fn from(err: ClientError) -> Self {
        ActionError::Rpc(RpcError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through_verbatim() {
        assert_eq!(
            ActionError::Validation("Invalid mint address".into()).to_string(),
            "Invalid mint address"
        );
        assert_eq!(
            ActionError::Other(anyhow::anyhow!("boom")).to_string(),
            "boom"
        );
        assert_eq!(
            ActionError::Rpc(RpcError::CustomError("Blockhash not found".into())).to_string(),
            "Blockhash not found"
        );
        assert_eq!(ActionError::WalletNotConnected.to_string(), "Wallet not connected");
    }

    #[test]
    fn test_local_classification() {
        assert!(ActionError::WalletNotConnected.is_local());
        assert!(ActionError::validation("x").is_local());
        assert!(!ActionError::precondition("x").is_local());
        assert!(!ActionError::Rpc(RpcError::CustomError("x".into())).is_local());
    }
}
