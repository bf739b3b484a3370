//! Wallet capability and the unsigned transaction it signs.

use crate::error::ActionError;
use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::sync::Arc;

/// An unsigned transaction bound to a fee payer and a recent blockhash.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub instructions: Vec<Instruction>,
    pub fee_payer: Pubkey,
    pub recent_blockhash: Hash,
}

impl TransactionDraft {
    pub fn new(instructions: Vec<Instruction>, fee_payer: Pubkey, recent_blockhash: Hash) -> Self {
        Self {
            instructions,
            fee_payer,
            recent_blockhash,
        }
    }

    /// Compile the draft into a transaction with empty signatures.
    pub fn to_unsigned_transaction(&self) -> Transaction {
        let mut transaction =
            Transaction::new_with_payer(&self.instructions, Some(&self.fee_payer));
        transaction.message.recent_blockhash = self.recent_blockhash;
        transaction
    }
}

/// Something that can sign for one address: a keypair, a browser wallet
/// bridge, a hardware device.
///
/// The pipeline borrows a signer for exactly one action and never keeps it.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// `None` when no wallet is connected.
    fn address(&self) -> Option<Pubkey>;

    async fn sign_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ActionError>;
}

fn sign_with(signer: &dyn Signer, draft: &TransactionDraft) -> Result<Transaction, ActionError> {
    let mut transaction = draft.to_unsigned_transaction();
    let signers: Vec<&dyn Signer> = vec![signer];
    transaction
        .try_sign(&signers, draft.recent_blockhash)
        .map_err(|e| ActionError::Signing(format!("Failed to sign transaction: {e}")))?;
    Ok(transaction)
}

#[async_trait]
impl TransactionSigner for Keypair {
    fn address(&self) -> Option<Pubkey> {
        Some(self.pubkey())
    }

    async fn sign_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ActionError> {
        sign_with(self, draft)
    }
}

/// A wallet slot that may or may not hold a connected signer.
#[derive(Clone, Default)]
pub struct WalletSigner {
    inner: Option<Arc<dyn Signer + Send + Sync>>,
}

impl WalletSigner {
    pub fn connected(signer: Arc<dyn Signer + Send + Sync>) -> Self {
        Self {
            inner: Some(signer),
        }
    }

    pub fn disconnected() -> Self {
        Self { inner: None }
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_some()
    }
}

#[async_trait]
impl TransactionSigner for WalletSigner {
    fn address(&self) -> Option<Pubkey> {
        self.inner.as_ref().map(|signer| signer.pubkey())
    }

    async fn sign_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ActionError> {
        let signer = self.inner.as_ref().ok_or(ActionError::WalletNotConnected)?;
        sign_with(signer.as_ref(), draft)
    }
}
