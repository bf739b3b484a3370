use super::{associated_token_address, create_associated_account_ix, draft, fetch_mint};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{
    decimal_to_base_units, validate_address, validate_amount, AuthorityRequirement,
};
use async_trait::async_trait;
use mosaic_types::{AuthorityRole, MintOptions, MintOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

/// Mint new supply into the recipient's associated token account,
/// creating the account when needed.
pub struct MintTokens;

#[async_trait]
impl TokenAction for MintTokens {
    const NAME: &'static str = "mint";
    type Options = MintOptions;
    type Output = MintOutcome;

    fn validate(&self, options: &MintOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_address(&options.recipient, "recipient")?;
        validate_amount(&options.amount)?;
        AuthorityRequirement::from_option(options.mint_authority.as_deref(), AuthorityRole::Mint)?
            .ensure_signer(signer, AuthorityRole::Mint, "mint tokens")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, MintOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let recipient = validate_address(&options.recipient, "recipient")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        snapshot.ensure_authority(AuthorityRole::Mint, &ctx.signer_address)?;

        let amount = decimal_to_base_units(&options.amount, snapshot.decimals)?;
        let destination = associated_token_address(&recipient, &mint);
        info!("[MintTokens] Minting {} base units of {} to {}", amount, mint, destination);

        let instructions = vec![
            create_associated_account_ix(&ctx.signer_address, &recipient, &mint),
            spl_token_2022::instruction::mint_to_checked(
                &spl_token_2022::id(),
                &mint,
                &destination,
                &ctx.signer_address,
                &[],
                amount,
                snapshot.decimals,
            )?,
        ];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &MintOptions,
        _signer: &Pubkey,
    ) -> MintOutcome {
        MintOutcome {
            minted_amount: options.amount.trim().to_string(),
            recipient: options.recipient.trim().to_string(),
        }
    }
}
