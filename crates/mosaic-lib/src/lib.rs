//! Mosaic token-action pipeline.
//!
//! Every privileged Token-2022 operation (mint, burn, force transfer, pause,
//! authority rotation, ...) goes through one uniform lifecycle:
//! validate the options, build an unsigned transaction, have the caller's
//! signer sign it, submit it, and map the outcome to an [`ActionResult`].
//!
//! - [`pipeline`] holds the generic orchestration and the [`TokenAction`] trait
//! - [`actions`] holds the twelve concrete actions
//! - [`validation`] and [`mint_state`] hold the local and on-chain checks
//! - [`rpc`] and [`signer`] are the injected network and wallet capabilities

pub mod actions;
pub mod config;
pub mod creation;
pub mod error;
pub mod logging;
pub mod mint_state;
pub mod pipeline;
pub mod rpc;
pub mod signer;
pub mod validation;

pub use actions::{
    associated_token_address, burn_tokens, close_token_account, force_burn_tokens,
    force_transfer_tokens, freeze_account, mint_tokens, pause_token, remove_authority,
    thaw_account, transfer_tokens, unpause_token, update_authority, BurnTokens,
    CloseTokenAccount, ForceBurn, ForceTransfer, FreezeAccount, MintTokens, PauseToken,
    RemoveAuthority, ThawAccount, TransferTokens, UnpauseToken, UpdateAuthority,
};
pub use config::{MosaicConfig, RpcEndpoint};
pub use creation::{
    mint_account_space, mint_extension_types, validate_create_options, ResolvedCreateOptions,
};
pub use error::{ActionError, RpcError};
pub use pipeline::{execute_token_action, ActionExecutor, ActionOptions, BuildContext, TokenAction};
pub use rpc::{RpcConnection, RpcConnector, SolanaRpcConnection, SolanaRpcConnector};
pub use signer::{TransactionDraft, TransactionSigner, WalletSigner};

pub use mosaic_types as types;
pub use mosaic_types::{ActionResult, AuthorityRole, UNKNOWN_ERROR};
