use super::{draft, require_token_account};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{validate_address, validate_optional_address};
use async_trait::async_trait;
use mosaic_types::{CloseAccountOptions, CloseAccountOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Close the signer's empty token account for a mint, sending the rent to
/// `destination` or back to the signer.
pub struct CloseTokenAccount;

#[async_trait]
impl TokenAction for CloseTokenAccount {
    const NAME: &'static str = "close_account";
    type Options = CloseAccountOptions;
    type Output = CloseAccountOutcome;

    fn validate(&self, options: &CloseAccountOptions, _signer: &Pubkey) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        validate_optional_address(options.destination.as_deref(), "destination")?;
        Ok(())
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, CloseAccountOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let destination = validate_optional_address(options.destination.as_deref(), "destination")?
            .unwrap_or(ctx.signer_address);

        let account = require_token_account(ctx.rpc, &ctx.signer_address, &mint).await?;
        if account.amount != 0 {
            return Err(ActionError::precondition(
                "Token account must have a zero balance before it can be closed",
            ));
        }

        let instructions = vec![spl_token_2022::instruction::close_account(
            &spl_token_2022::id(),
            &account.address,
            &destination,
            &ctx.signer_address,
            &[],
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &CloseAccountOptions,
        signer: &Pubkey,
    ) -> CloseAccountOutcome {
        let mint = validate_address(&options.mint_address, "mint").ok();
        let destination = validate_optional_address(options.destination.as_deref(), "destination")
            .ok()
            .flatten()
            .unwrap_or(*signer);
        CloseAccountOutcome {
            closed_account: mint
                .map(|mint| super::associated_token_address(signer, &mint).to_string())
                .unwrap_or_default(),
            destination: destination.to_string(),
        }
    }
}
