use super::{
    associated_token_address, create_associated_account_ix, draft, ensure_balance, fetch_mint,
    require_token_account,
};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{decimal_to_base_units, validate_address, validate_amount};
use async_trait::async_trait;
use mosaic_types::{TransferOptions, TransferOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Transfer from the signer's own token account to a recipient wallet.
pub struct TransferTokens;

#[async_trait]
impl TokenAction for TransferTokens {
    const NAME: &'static str = "transfer";
    type Options = TransferOptions;
    type Output = TransferOutcome;

    fn validate(&self, options: &TransferOptions, _signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_address(&options.recipient, "recipient")?;
        validate_amount(&options.amount)?;
        Ok(())
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, TransferOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let recipient = validate_address(&options.recipient, "recipient")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        if snapshot.paused == Some(true) {
            return Err(ActionError::precondition(format!(
                "Mint {mint} is paused; transfers are disabled"
            )));
        }

        let amount = decimal_to_base_units(&options.amount, snapshot.decimals)?;
        let source = require_token_account(ctx.rpc, &ctx.signer_address, &mint).await?;
        if source.is_frozen {
            return Err(ActionError::precondition(format!(
                "Token account {} is frozen",
                source.address
            )));
        }
        ensure_balance(&source, amount, snapshot.decimals)?;

        let destination = associated_token_address(&recipient, &mint);
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
        options: &TransferOptions,
        _signer: &Pubkey,
    ) -> TransferOutcome {
        TransferOutcome {
            transferred_amount: options.amount.trim().to_string(),
            recipient: options.recipient.trim().to_string(),
        }
    }
}
