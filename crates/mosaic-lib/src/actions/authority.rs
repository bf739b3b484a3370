//! Reassign or revoke a mint authority role through `SetAuthority`.
//!
//! Both actions check the current holder twice: locally against the
//! caller's `current_authority` override, then against the mint on chain.

use super::{draft, fetch_mint};
use crate::error::ActionError;
use crate::mint_state::authority_type;
use crate::pipeline::{BuildContext, TokenAction};
use crate::signer::TransactionDraft;
use crate::validation::{validate_address, AuthorityRequirement};
use async_trait::async_trait;
use mosaic_types::{
    AuthorityRole, RemoveAuthorityOptions, RemoveAuthorityOutcome, UpdateAuthorityOptions,
    UpdateAuthorityOutcome,
};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{info, warn};

pub struct UpdateAuthority;

pub struct RemoveAuthority;

fn set_authority_ix(
    mint: &Pubkey,
    new_authority: Option<&Pubkey>,
    role: AuthorityRole,
    current: &Pubkey,
) -> Result<solana_sdk::instruction::Instruction, ActionError> {
    Ok(spl_token_2022::instruction::set_authority(
        &spl_token_2022::id(),
        mint,
        new_authority,
        authority_type(role),
        current,
        &[],
    )?)
}

#[async_trait]
impl TokenAction for UpdateAuthority {
    const NAME: &'static str = "update_authority";
    type Options = UpdateAuthorityOptions;
    type Output = UpdateAuthorityOutcome;

    fn validate(
        &self,
        options: &UpdateAuthorityOptions,
        signer: &Pubkey,
    ) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        let new_authority = validate_address(&options.new_authority, "new authority")?;
        let requirement =
            AuthorityRequirement::from_option(options.current_authority.as_deref(), options.role)?;
        requirement.ensure_signer(signer, options.role, "update this authority")?;

        if new_authority == requirement.expected(signer) {
            return Err(ActionError::validation(format!(
                "New {} must differ from the current one",
                options.role.label()
            )));
        }
        Ok(())
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, UpdateAuthorityOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;
        let new_authority = validate_address(&options.new_authority, "new authority")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        snapshot.ensure_authority(options.role, &ctx.signer_address)?;

        info!(
            "[UpdateAuthority] Moving {} of {} to {}",
            options.role.label(),
            mint,
            new_authority
        );
        let instructions = vec![set_authority_ix(
            &mint,
            Some(&new_authority),
            options.role,
            &ctx.signer_address,
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &UpdateAuthorityOptions,
        _signer: &Pubkey,
    ) -> UpdateAuthorityOutcome {
        UpdateAuthorityOutcome {
            role: options.role,
            new_authority: options.new_authority.trim().to_string(),
        }
    }
}

#[async_trait]
impl TokenAction for RemoveAuthority {
    const NAME: &'static str = "remove_authority";
    type Options = RemoveAuthorityOptions;
    type Output = RemoveAuthorityOutcome;

    fn validate(
        &self,
        options: &RemoveAuthorityOptions,
        signer: &Pubkey,
    ) -> Result<(), ActionError> {
        validate_address(&options.mint_address, "mint")?;
        AuthorityRequirement::from_option(options.current_authority.as_deref(), options.role)?
            .ensure_signer(signer, options.role, "remove this authority")
    }

    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, RemoveAuthorityOptions>,
    ) -> Result<TransactionDraft, ActionError> {
        let options = ctx.options;
        let mint = validate_address(&options.mint_address, "mint")?;

        let snapshot = fetch_mint(ctx.rpc, &mint).await?;
        snapshot.ensure_authority(options.role, &ctx.signer_address)?;

        warn!(
            "[RemoveAuthority] Revoking {} of {}; this cannot be undone",
            options.role.label(),
            mint
        );
        let instructions = vec![set_authority_ix(
            &mint,
            None,
            options.role,
            &ctx.signer_address,
        )?];
        draft(ctx.rpc, instructions, ctx.signer_address).await
    }

    fn build_success_result(
        &self,
        _signature: &Signature,
        options: &RemoveAuthorityOptions,
        _signer: &Pubkey,
    ) -> RemoveAuthorityOutcome {
        RemoveAuthorityOutcome { role: options.role }
    }
}
