use super::{draft, ensure_balance, fetch_mint, require_token_account};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{decimal_to_base_units, validate_address, validate_amount};
use async_trait::async_trait;
use mosaic_types::{BurnOptions, BurnOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Burn tokens the signer holds.
pub struct BurnTokens;

#[async_trait]
impl TokenAction for BurnTokens {
    const NAME: &'static str = "burn";
    type Options = BurnOptions;
    type Output = BurnOutcome;

    fn validate(&self, options: &BurnOptions, _signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_amount(&options.amount)?;
        Ok(())
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, BurnOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let mint = validate_address(&ctx.options.mint_address, "mint")?;
        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        let amount = decimal_to_base_units(&ctx.options.amount, snapshot.decimals)?;

        let source = require_token_account(ctx.rpc, &ctx.signer_address, &mint).await?;
        ensure_balance(&source, amount, snapshot.decimals)?;

        let instructions = vec![spl_token_2022::instruction::burn_checked(
            &spl_token_2022::id(),
            &source.address,
            &mint,
            &ctx.signer_address,
            &[],
            amount,
            snapshot.decimals,
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &BurnOptions,
        _signer: &Pubkey,
    ) -> BurnOutcome {
        BurnOutcome {
            burned_amount: options.amount.trim().to_string(),
        }
    }
}
