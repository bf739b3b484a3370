//! Decoded view of Token-2022 mint and token accounts.
//!
//! Builders read these snapshots to check on-chain preconditions (who
//! actually holds an authority, whether a mint is paused, whether an account
//! is empty) before they assemble instructions.

use crate::error::ActionError;
use mosaic_types::AuthorityRole;
use solana_program::program_option::COption;
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token_2022::{
    extension::{
        confidential_transfer::ConfidentialTransferMint, metadata_pointer::MetadataPointer,
        pausable::PausableConfig, permanent_delegate::PermanentDelegate, scaled_ui_amount,
        BaseStateWithExtensions, StateWithExtensions,
    },
    instruction::AuthorityType,
    state::{Account as TokenAccount, AccountState, Mint},
};

/// Current state of one authority slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSlot {
    /// The mint was created without the extension that carries this role.
    Missing,
    /// The role exists but was revoked.
    Revoked,
    Held(Pubkey),
}

impl From<Option<Pubkey>> for RoleSlot {
    fn from(value: Option<Pubkey>) -> Self {
        match value {
            Some(key) => RoleSlot::Held(key),
            None => RoleSlot::Revoked,
        }
    }
}

impl From<COption<Pubkey>> for RoleSlot {
    fn from(value: COption<Pubkey>) -> Self {
        match value {
            COption::Some(key) => RoleSlot::Held(key),
            COption::None => RoleSlot::Revoked,
        }
    }
}

/// Token-2022 `AuthorityType` used by `SetAuthority` for a role.
pub fn authority_type(role: AuthorityRole) -> AuthorityType {
    match role {
        AuthorityRole::Mint => AuthorityType::MintTokens,
        AuthorityRole::Freeze => AuthorityType::FreezeAccount,
        AuthorityRole::Pause => AuthorityType::Pause,
        AuthorityRole::PermanentDelegate => AuthorityType::PermanentDelegate,
        AuthorityRole::ConfidentialTransfer => AuthorityType::ConfidentialTransferMint,
        AuthorityRole::ScaledUiAmount => AuthorityType::ScaledUiAmount,
        AuthorityRole::Metadata => AuthorityType::MetadataPointer,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MintSnapshot {
    pub address: Pubkey,
    pub decimals: u8,
    pub supply: u64,
    pub mint_authority: RoleSlot,
    pub freeze_authority: RoleSlot,
    pub permanent_delegate: RoleSlot,
    pub pause_authority: RoleSlot,
    /// `None` when the mint is not pausable.
    pub paused: Option<bool>,
    pub confidential_transfer_authority: RoleSlot,
    pub scaled_ui_amount_authority: RoleSlot,
    pub metadata_authority: RoleSlot,
}

impl MintSnapshot {
    /// Decode a fetched mint account, rejecting anything not owned by the
    /// Token-2022 program.
    pub fn from_account(address: &Pubkey, account: &Account) -> Result<Self, ActionError> {
        if account.owner != spl_token_2022::id() {
            return Err(ActionError::precondition(format!(
                "Mint {address} is not a Token-2022 mint (owned by {})",
                account.owner
            )));
        }
        Self::unpack(address, &account.data)
    }

    pub fn unpack(address: &Pubkey, data: &[u8]) -> Result<Self, ActionError> {
        let state = StateWithExtensions::<Mint>::unpack(data).map_err(|e| {
            ActionError::precondition(format!("Failed to decode mint {address}: {e}"))
        })?;

        let permanent_delegate = state
            .get_extension::<PermanentDelegate>()
            .map(|ext| RoleSlot::from(Option::<Pubkey>::from(ext.delegate)))
            .unwrap_or(RoleSlot::Missing);

        let (pause_authority, paused) = match state.get_extension::<PausableConfig>() {
            Ok(ext) => (
                RoleSlot::from(Option::<Pubkey>::from(ext.authority)),
                Some(bool::from(ext.paused)),
            ),
            Err(_) => (RoleSlot::Missing, None),
        };

        let confidential_transfer_authority = state
            .get_extension::<ConfidentialTransferMint>()
            .map(|ext| RoleSlot::from(Option::<Pubkey>::from(ext.authority)))
            .unwrap_or(RoleSlot::Missing);

        let scaled_ui_amount_authority = state
            .get_extension::<scaled_ui_amount::ScaledUiAmountConfig>()
            .map(|ext| RoleSlot::from(Option::<Pubkey>::from(ext.authority)))
            .unwrap_or(RoleSlot::Missing);

        let metadata_authority = state
            .get_extension::<MetadataPointer>()
            .map(|ext| RoleSlot::from(Option::<Pubkey>::from(ext.authority)))
            .unwrap_or(RoleSlot::Missing);

        Ok(Self {
            address: *address,
            decimals: state.base.decimals,
            supply: state.base.supply,
            mint_authority: RoleSlot::from(state.base.mint_authority),
            freeze_authority: RoleSlot::from(state.base.freeze_authority),
            permanent_delegate,
            pause_authority,
            paused,
            confidential_transfer_authority,
            scaled_ui_amount_authority,
            metadata_authority,
        })
    }

    pub fn authority_for(&self, role: AuthorityRole) -> RoleSlot {
        match role {
            AuthorityRole::Mint => self.mint_authority,
            AuthorityRole::Freeze => self.freeze_authority,
            AuthorityRole::Pause => self.pause_authority,
            AuthorityRole::PermanentDelegate => self.permanent_delegate,
            AuthorityRole::ConfidentialTransfer => self.confidential_transfer_authority,
            AuthorityRole::ScaledUiAmount => self.scaled_ui_amount_authority,
            AuthorityRole::Metadata => self.metadata_authority,
        }
    }

    /// Fail unless `signer` currently holds `role` on chain.
    pub fn ensure_authority(
        &self,
        role: AuthorityRole,
        signer: &Pubkey,
    ) -> Result<(), ActionError> {
        let label = role.label();
        match self.authority_for(role) {
            RoleSlot::Held(holder) if holder == *signer => Ok(()),
            RoleSlot::Held(holder) => Err(ActionError::Unauthorized(format!(
                "Connected wallet {signer} is not the {label} of mint {}; \
                 the current {label} is {holder}",
                self.address
            ))),
            RoleSlot::Revoked => Err(ActionError::precondition(format!(
                "The {label} of mint {} has been revoked",
                self.address
            ))),
            RoleSlot::Missing => Err(ActionError::precondition(format!(
                "Mint {} has no {label}",
                self.address
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenAccountSnapshot {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub is_frozen: bool,
}

impl TokenAccountSnapshot {
    pub fn from_account(address: &Pubkey, account: &Account) -> Result<Self, ActionError> {
        if account.owner != spl_token_2022::id() {
            return Err(ActionError::precondition(format!(
                "Token account {address} is not a Token-2022 account (owned by {})",
                account.owner
            )));
        }
        Self::unpack(address, &account.data)
    }

    pub fn unpack(address: &Pubkey, data: &[u8]) -> Result<Self, ActionError> {
        let state = StateWithExtensions::<TokenAccount>::unpack(data).map_err(|e| {
            ActionError::precondition(format!("Failed to decode token account {address}: {e}"))
        })?;
        Ok(Self {
            address: *address,
            mint: state.base.mint,
            owner: state.base.owner,
            amount: state.base.amount,
            is_frozen: state.base.state == AccountState::Frozen,
        })
    }
}
