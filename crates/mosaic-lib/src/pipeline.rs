//! Generic validate → build → sign → send → map lifecycle.
//!
//! A concrete action supplies three functions through [`TokenAction`]; the
//! executor owns everything else: resolving the signer, constructing an RPC
//! connection, signing, submitting and normalizing the outcome.

use crate::config::{global_config, MosaicConfig};
use crate::error::ActionError;
use crate::rpc::{RpcConnection, RpcConnector, SolanaRpcConnector};
use crate::signer::{TransactionDraft, TransactionSigner};
use async_trait::async_trait;
use futures::FutureExt;
use mosaic_types::{ActionResult, UNKNOWN_ERROR};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, instrument, warn};

/// Fields every option struct exposes to the pipeline.
pub trait ActionOptions: Send + Sync {
    fn mint_address(&self) -> &str;

    /// Per-call RPC endpoint override.
    fn rpc_url(&self) -> Option<&str>;
}

/// Everything a builder may use to assemble a transaction.
pub struct BuildContext<'a, O> {
    pub rpc: &'a dyn RpcConnection,
    pub signer: &'a dyn TransactionSigner,
    pub signer_address: Pubkey,
    pub options: &'a O,
}

/// One kind of token action plugged into the pipeline.
#[async_trait]
pub trait TokenAction: Send + Sync {
    /// Short name used in logs, e.g. `"force_burn"`.
    const NAME: &'static str;

    type Options: ActionOptions;
    type Output: Send;

    /// Local shape and authority checks. Must not touch the network.
    fn validate(&self, options: &Self::Options, signer: &Pubkey) -> Result<(), ActionError>;

    /// Assemble the unsigned transaction. May read chain state to check
    /// preconditions and must fail if one is violated.
    async fn build_transaction(
        &self,
        ctx: BuildContext<'_, Self::Options>,
    ) -> Result<TransactionDraft, ActionError>;

    /// Action-specific fields of a successful result.
    fn build_success_result(
        &self,
        signature: &Signature,
        options: &Self::Options,
        signer: &Pubkey,
    ) -> Self::Output;
}

/// Runs actions against a connector and a fixed configuration.
pub struct ActionExecutor<C = SolanaRpcConnector> {
    connector: C,
    config: MosaicConfig,
}

impl ActionExecutor<SolanaRpcConnector> {
    /// Executor using the process-wide configuration.
    pub fn from_env() -> Self {
        Self::new(SolanaRpcConnector, global_config().clone())
    }
}

impl Default for ActionExecutor<SolanaRpcConnector> {
    fn default() -> Self {
        Self::from_env()
    }
}

impl<C: RpcConnector> ActionExecutor<C> {
    pub fn new(connector: C, config: MosaicConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Run one action. Never panics and never returns early with an error:
    /// every failure becomes `ActionResult::Failure`.
    pub async fn execute<A: TokenAction>(
        &self,
        action: &A,
        options: &A::Options,
        signer: &dyn TransactionSigner,
    ) -> ActionResult<A::Output> {
        execute_token_action(action, options, signer, &self.connector, &self.config).await
    }
}

/// Free-standing form of [`ActionExecutor::execute`].
#[instrument(
    name = "token_action",
    skip_all,
    fields(action = A::NAME, mint = %options.mint_address())
)]
pub async fn execute_token_action<A, C>(
    action: &A,
    options: &A::Options,
    signer: &dyn TransactionSigner,
    connector: &C,
    config: &MosaicConfig,
) -> ActionResult<A::Output>
where
    A: TokenAction,
    C: RpcConnector + ?Sized,
{
    let attempt = AssertUnwindSafe(run_action(action, options, signer, connector, config))
        .catch_unwind()
        .await;

    match attempt {
        Ok(Ok((signature, details))) => {
            info!(signature = %signature, "[{}] Transaction confirmed", A::NAME);
            ActionResult::success(signature.to_string(), details)
        }
        Ok(Err(err)) => {
            warn!(error = %err, local = err.is_local(), "[{}] Action failed", A::NAME);
            ActionResult::failure(err.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(error = %message, "[{}] Action panicked", A::NAME);
            ActionResult::failure(message)
        }
    }
}

async fn run_action<A, C>(
    action: &A,
    options: &A::Options,
    signer: &dyn TransactionSigner,
    connector: &C,
    config: &MosaicConfig,
) -> Result<(Signature, A::Output), ActionError>
where
    A: TokenAction,
    C: RpcConnector + ?Sized,
{
    let signer_address = signer.address().ok_or(ActionError::WalletNotConnected)?;

    action.validate(options, &signer_address)?;

    let endpoint = config.endpoint_for(options.rpc_url());
    debug!(rpc_url = %endpoint.http_url, "Connecting");
    let rpc = connector.connect(&endpoint, config.commitment)?;

    let draft = action
        .build_transaction(BuildContext {
            rpc: rpc.as_ref(),
            signer,
            signer_address,
            options,
        })
        .await?;

    debug!(
        instructions = draft.instructions.len(),
        fee_payer = %draft.fee_payer,
        "Signing transaction"
    );
    let transaction = signer.sign_transaction(&draft).await?;

    debug!("Sending transaction");
    let signature = rpc.send_and_confirm_transaction(&transaction).await?;

    let details = action.build_success_result(&signature, options, &signer_address);
    Ok((signature, details))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_ERROR.to_string()
    }
}

/// Implement [`ActionOptions`] for option structs with `mint_address` and
/// `rpc_url` fields.
macro_rules! impl_action_options {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $crate::pipeline::ActionOptions for $options {
                fn mint_address(&self) -> &str {
                    &self.mint_address
                }

                fn rpc_url(&self) -> Option<&str> {
                    self.rpc_url.as_deref()
                }
            }
        )+
    };
}

impl_action_options!(
    mosaic_types::MintOptions,
    mosaic_types::BurnOptions,
    mosaic_types::ForceTransferOptions,
    mosaic_types::ForceBurnOptions,
    mosaic_types::FreezeOptions,
    mosaic_types::PauseOptions,
    mosaic_types::UpdateAuthorityOptions,
    mosaic_types::RemoveAuthorityOptions,
    mosaic_types::TransferOptions,
    mosaic_types::CloseAccountOptions,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_extraction() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(text.as_ref()), "boom");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(owned.as_ref()), "owned boom");

        let opaque: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(opaque.as_ref()), UNKNOWN_ERROR);
    }
}
