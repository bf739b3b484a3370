use super::{
    associated_token_address, create_associated_account_ix, draft, ensure_balance, fetch_mint,
    require_token_account,
};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{
    decimal_to_base_units, validate_address, validate_amount, AuthorityRequirement,
};
use async_trait::async_trait;
use mosaic_types::{AuthorityRole, ForceTransferOptions, ForceTransferOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

/// Move tokens out of any holder's account using the mint's permanent
/// delegate.
///
/// The mint must carry the PermanentDelegate extension and the signer must
/// be that delegate; the holder does not sign.
pub struct ForceTransfer;

#[async_trait]
impl TokenAction for ForceTransfer {
    const NAME: &'static str = "force_transfer";
    type Options = ForceTransferOptions;
    type Output = ForceTransferOutcome;

    fn validate(&self, options: &ForceTransferOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_address(&options.from_address, "source")?;
        validate_address(&options.recipient_address, "recipient")?;
        validate_amount(&options.amount)?;
        AuthorityRequirement::from_option(
            options.permanent_delegate.as_deref(),
            AuthorityRole::PermanentDelegate,
        )?
        .ensure_signer(signer, AuthorityRole::PermanentDelegate, "force transfer tokens")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, ForceTransferOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let from = validate_address(&options.from_address, "source")?;
        let recipient = validate_address(&options.recipient_address, "recipient")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        snapshot.ensure_authority(AuthorityRole::PermanentDelegate, &ctx.signer_address)?;

        let amount = decimal_to_base_units(&options.amount, snapshot.decimals)?;
        let source = require_token_account(ctx.rpc, &from, &mint).await?;
        ensure_balance(&source, amount, snapshot.decimals)?;

        let destination = associated_token_address(&recipient, &mint);
        info!(
            "[ForceTransfer] Moving {} base units from {} to {}",
            amount, source.address, destination
        );

        let instructions = vec![
            create_associated_account_ix(&ctx.signer_address, &recipient, &mint),
            spl_token_2022::instruction::transfer_checked(
                &spl_token_2022::id(),
                &source.address,
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
        options: &ForceTransferOptions,
        _signer: &Pubkey,
    ) -> ForceTransferOutcome {
        ForceTransferOutcome {
            transferred_amount: options.amount.trim().to_string(),
            from_address: options.from_address.trim().to_string(),
            to_address: options.recipient_address.trim().to_string(),
        }
    }
}
