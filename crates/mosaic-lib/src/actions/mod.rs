//! Concrete token actions.
//!
//! Each action is a unit struct implementing [`TokenAction`]; the free
//! functions at the bottom run an action through an executor configured from
//! the environment, which is what most callers want.

use crate::error::ActionError;
use crate::mint_state::{MintSnapshot, TokenAccountSnapshot};
use crate::pipeline::{ActionExecutor, TokenAction};
use crate::rpc::RpcConnection;
use crate::signer::{TransactionDraft, TransactionSigner};
use mosaic_types::*;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

pub mod authority;
pub mod burn;
pub mod close_account;
pub mod force_burn;
pub mod force_transfer;
pub mod freeze;
pub mod mint;
pub mod pause;
pub mod transfer;

pub use authority::{RemoveAuthority, UpdateAuthority};
pub use burn::BurnTokens;
pub use close_account::CloseTokenAccount;
pub use force_burn::ForceBurn;
pub use force_transfer::ForceTransfer;
pub use freeze::{FreezeAccount, ThawAccount};
pub use mint::MintTokens;
pub use pause::{PauseToken, UnpauseToken};
pub use transfer::TransferTokens;

/// Associated token account of `wallet` for a Token-2022 `mint`.
pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(
        wallet,
        mint,
        &spl_token_2022::id(),
    )
}

/// Create `wallet`'s associated token account if it does not exist yet.
pub(crate) fn create_associated_account_ix(
    payer: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account_idempotent(
        payer,
        wallet,
        mint,
        &spl_token_2022::id(),
    )
}

pub(crate) async fn fetch_mint(
    rpc: &dyn RpcConnection,
    mint: &Pubkey,
) -> Result<MintSnapshot, ActionError> {
    let account = rpc
        .get_account(mint)
        .await?
        .ok_or_else(|| ActionError::precondition(format!("Mint account {mint} not found")))?;
    MintSnapshot::from_account(mint, &account)
}

pub(crate) async fn fetch_token_account(
    rpc: &dyn RpcConnection,
    address: &Pubkey,
) -> Result<Option<TokenAccountSnapshot>, ActionError> {
    match rpc.get_account(address).await? {
        Some(account) => TokenAccountSnapshot::from_account(address, &account).map(Some),
        None => Ok(None),
    }
}

/// Fetch `wallet`'s token account for `mint`, failing if it does not exist.
pub(crate) async fn require_token_account(
    rpc: &dyn RpcConnection,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<TokenAccountSnapshot, ActionError> {
    let address = associated_token_address(wallet, mint);
    fetch_token_account(rpc, &address).await?.ok_or_else(|| {
        ActionError::precondition(format!(
            "Wallet {wallet} has no token account for mint {mint}"
        ))
    })
}

/// Fail unless `account` can cover `amount` base units.
pub(crate) fn ensure_balance(
    account: &TokenAccountSnapshot,
    amount: u64,
    decimals: u8,
) -> Result<(), ActionError> {
    if account.amount < amount {
        return Err(ActionError::precondition(format!(
            "Insufficient token balance in {}: requested {}, available {}",
            account.address,
            crate::validation::base_units_to_decimal(amount, decimals),
            crate::validation::base_units_to_decimal(account.amount, decimals)
        )));
    }
    Ok(())
}

/// Bind instructions to the fee payer and a fresh blockhash.
pub(crate) async fn draft(
    rpc: &dyn RpcConnection,
    instructions: Vec<Instruction>,
    fee_payer: Pubkey,
) -> Result<TransactionDraft, ActionError> {
    let recent_blockhash = rpc.get_latest_blockhash().await?;
    Ok(TransactionDraft::new(instructions, fee_payer, recent_blockhash))
}

async fn run<A: TokenAction>(
    action: A,
    options: &A::Options,
    signer: &dyn TransactionSigner,
) -> ActionResult<A::Output> {
    ActionExecutor::from_env()
        .execute(&action, options, signer)
        .await
}

pub async fn mint_tokens(
    options: &MintOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<MintOutcome> {
    run(MintTokens, options, signer).await
}

pub async fn burn_tokens(
    options: &BurnOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<BurnOutcome> {
    run(BurnTokens, options, signer).await
}

pub async fn force_transfer_tokens(
    options: &ForceTransferOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<ForceTransferOutcome> {
    run(ForceTransfer, options, signer).await
}

pub async fn force_burn_tokens(
    options: &ForceBurnOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<ForceBurnOutcome> {
    run(ForceBurn, options, signer).await
}

pub async fn freeze_account(
    options: &FreezeOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<FreezeOutcome> {
    run(FreezeAccount, options, signer).await
}

pub async fn thaw_account(
    options: &FreezeOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<ThawOutcome> {
    run(ThawAccount, options, signer).await
}

pub async fn pause_token(
    options: &PauseOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<PauseOutcome> {
    run(PauseToken, options, signer).await
}

pub async fn unpause_token(
    options: &PauseOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<PauseOutcome> {
    run(UnpauseToken, options, signer).await
}

pub async fn update_authority(
    options: &UpdateAuthorityOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<UpdateAuthorityOutcome> {
    run(UpdateAuthority, options, signer).await
}

pub async fn remove_authority(
    options: &RemoveAuthorityOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<RemoveAuthorityOutcome> {
    run(RemoveAuthority, options, signer).await
}

pub async fn transfer_tokens(
    options: &TransferOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<TransferOutcome> {
    run(TransferTokens, options, signer).await
}

pub async fn close_token_account(
    options: &CloseAccountOptions,
    signer: &dyn TransactionSigner,
) -> ActionResult<CloseAccountOutcome> {
    run(CloseTokenAccount, options, signer).await
}
