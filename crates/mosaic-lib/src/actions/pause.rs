use super::{draft, fetch_mint};
use crate::error::ActionError;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{validate_address, AuthorityRequirement};
use async_trait::async_trait;
use mosaic_types::{AuthorityRole, PauseOptions, PauseOutcome};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use spl_token_2022::extension::pausable::instruction as pausable;

/// Halt every transfer, mint and burn of a pausable mint.
pub struct PauseToken;

/// Resume a paused mint.
pub struct UnpauseToken;

fn validate_pause(
    options: &PauseOptions,
    signer: &Pubkey,
    action: &str,
) -> Result<(), ActionError> {
    validate_address(&options.mint_address, "mint")?;
    AuthorityRequirement::from_option(options.pause_authority.as_deref(), AuthorityRole::Pause)?
        .ensure_signer(signer, AuthorityRole::Pause, action)
}

/// Load the mint, check the pause authority and return its mint address
/// together with the current pause flag.
async fn load_pause_state(
    ctx: &BuildContext<'_, PauseOptions>,
) -> Result<(Pubkey, bool), ActionError> {
    let mint = validate_address(&ctx.options.mint_address, "mint")?;
    let snapshot = fetch_mint(ctx.rpc, &mint).await?;
    let paused = snapshot
        .paused
        .ok_or_else(|| ActionError::precondition(format!("Mint {mint} is not pausable")))?;
    snapshot.ensure_authority(AuthorityRole::Pause, &ctx.signer_address)?;
    Ok((mint, paused))
}

#[async_trait]
impl TokenAction for PauseToken {
    const NAME: &'static str = "pause";
    type Options = PauseOptions;
    type Output = PauseOutcome;

    fn validate(&self, options: &PauseOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_pause(options, signer, "pause this token")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, PauseOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let (mint, paused) = load_pause_state(&ctx).await?;
        if paused {
            return Err(ActionError::precondition("Token is already paused"));
        }
        let instructions = vec![pausable::pause(
            &spl_token_2022::id(),
            &mint,
            &ctx.signer_address,
            &[],
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        _options: &PauseOptions,
        _signer: &Pubkey,
    ) -> PauseOutcome {
        PauseOutcome { paused: true }
    }
}

#[async_trait]
impl TokenAction for UnpauseToken {
    const NAME: &'static str = "unpause";
    type Options = PauseOptions;
    type Output = PauseOutcome;

    fn validate(&self, options: &PauseOptions, signer: &Pubkey) -> Result<(), ActionError> {
        validate_pause(options, signer, "unpause this token")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, PauseOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let (mint, paused) = load_pause_state(&ctx).await?;
        if !paused {
            return Err(ActionError::precondition("Token is not paused"));
        }
        let instructions = vec![pausable::resume(
            &spl_token_2022::id(),
            &mint,
            &ctx.signer_address,
            &[],
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        _options: &PauseOptions,
        _signer: &Pubkey,
    ) -> PauseOutcome {
        PauseOutcome { paused: false }
    }
}
