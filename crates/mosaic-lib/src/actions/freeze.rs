use super::{associated_token_address, draft, fetch_mint, require_token_account};
use crate::error::ActionError;
use crate::mint_state::TokenAccountSnapshot;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{validate_address, AuthorityRequirement};
use async_trait::async_trait;
use mosaic_types::{AuthorityRole, FreezeOptions, FreezeOutcome, ThawOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

pub struct FreezeAccount;

pub struct ThawAccount;

fn validate_freeze(
    options: &FreezeOptions,
    signer: &Pubkey,
    action: &str,
) -> Result<(), ActionError> {
    validate_address(&options.mint_address, "mint")?;
    validate_address(&options.wallet_address, "wallet")?;
    AuthorityRequirement::from_option(options.freeze_authority.as_deref(), AuthorityRole::Freeze)?
        .ensure_signer(signer, AuthorityRole::Freeze, action)
}

/// Check the freeze authority on chain and load the wallet's token account.
async fn load_target(
    ctx: &BuildContext<'_, FreezeOptions>,
) -> Result<(Pubkey, TokenAccountSnapshot), ActionError> {
    let mint = validate_address(&ctx.options.mint_address, "mint")?;
    let wallet = validate_address(&ctx.options.wallet_address, "wallet")?;

    let snapshot = fetch_mint(ctx.rpc, &mint).await?;
    snapshot.ensure_authority(AuthorityRole::Freeze, &ctx.signer_address)?;

    let account = require_token_account(ctx.rpc, &wallet, &mint).await?;
    Ok((mint, account))
}

/// Token account the instruction targeted. Options were validated before
/// this runs, so the fallback is unreachable in practice.
fn target_account(options: &FreezeOptions) -> String {
    let wallet = validate_address(&options.wallet_address, "wallet");
    let mint = validate_address(&options.mint_address, "mint");
    match (wallet, mint) {
        (Ok(wallet), Ok(mint)) => associated_token_address(&wallet, &mint).to_string(),
        _ => options.wallet_address.trim().to_string(),
    }
}

#[async_trait]
impl TokenAction for FreezeAccount {
    const NAME: &'static str = "freeze";
    type Options = FreezeOptions;
    type Output = FreezeOutcome;

    fn validate(&self, options: &FreezeOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_freeze(options, signer, "freeze accounts")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, FreezeOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let (mint, account) = load_target(&ctx).await?;
        if account.is_frozen {
            return Err(ActionError::precondition(format!(
                "Token account {} is already frozen",
                account.address
            )));
        }

        let instructions = vec![spl_token_2022::instruction::freeze_account(
            &spl_token_2022::id(),
            &account.address,
            &mint,
            &ctx.signer_address,
            &[],
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &FreezeOptions,
        _signer: &Pubkey,
    ) -> FreezeOutcome {
        FreezeOutcome {
            frozen_account: target_account(options),
        }
    }
}

#[async_trait]
impl TokenAction for ThawAccount {
    const NAME: &'static str = "thaw";
    type Options = FreezeOptions;
    type Output = ThawOutcome;

    fn validate(&self, options: &FreezeOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_freeze(options, signer, "thaw accounts")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, FreezeOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let (mint, account) = load_target(&ctx).await?;
        if !account.is_frozen {
            return Err(ActionError::precondition(format!(
                "Token account {} is not frozen",
                account.address
            )));
        }

        let instructions = vec![spl_token_2022::instruction::thaw_account(
            &spl_token_2022::id(),
            &account.address,
            &mint,
            &ctx.signer_address,
            &[],
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &FreezeOptions,
        _signer: &Pubkey,
    ) -> ThawOutcome {
        ThawOutcome {
            thawed_account: target_account(options),
        }
    }
}
