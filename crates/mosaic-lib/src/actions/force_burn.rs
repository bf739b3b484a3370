use super::{draft, ensure_balance, fetch_mint, require_token_account};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{
    decimal_to_base_units, validate_address, validate_amount, AuthorityRequirement,
};
use async_trait::async_trait;
use mosaic_types::{AuthorityRole, ForceBurnOptions, ForceBurnOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

/// Burn tokens from any holder's account using the permanent delegate.
pub struct ForceBurn;

#[async_trait]
impl TokenAction for ForceBurn {
    const NAME: &'static str = "force_burn";
    type Options = ForceBurnOptions;
    type Output = ForceBurnOutcome;

    fn validate(&self, options: &ForceBurnOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_address(&options.from_address, "source")?;
        validate_amount(&options.amount)?;
        AuthorityRequirement::from_option(
            options.permanent_delegate.as_deref(),
            AuthorityRole::PermanentDelegate,
        )?
        .ensure_signer(signer, AuthorityRole::PermanentDelegate, "force burn tokens")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, ForceBurnOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let from = validate_address(&options.from_address, "source")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        snapshot.ensure_authority(AuthorityRole::PermanentDelegate, &ctx.signer_address)?;

        let amount = decimal_to_base_units(&options.amount, snapshot.decimals)?;
        let source = require_token_account(ctx.rpc, &from, &mint).await?;
        ensure_balance(&source, amount, snapshot.decimals)?;

        info!("[ForceBurn] Burning {} base units from {}", amount, source.address);

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
        options: &ForceBurnOptions,
        _signer: &Pubkey,
    ) -> ForceBurnOutcome {
        ForceBurnOutcome {
            burned_amount: options.amount.trim().to_string(),
            from_address: options.from_address.trim().to_string(),
        }
    }
}
