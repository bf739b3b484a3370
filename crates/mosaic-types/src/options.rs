//! Per-action input options.
//!
//! Addresses and amounts are carried as strings exactly as the caller
//! supplied them; parsing and validation happen in the action's `validate`
//! step so that a malformed value is reported as a failed result instead of
//! a deserialization error.

use crate::authority::AuthorityRole;
use serde::{Deserialize, Serialize};

/// Mint new supply to a recipient wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOptions {
    pub mint_address: String,
    /// Wallet that receives the tokens; its associated token account is
    /// created if missing.
    pub recipient: String,
    /// Decimal amount in UI units, e.g. "12.5".
    pub amount: String,
    /// Expected mint authority. Defaults to the signer.
    pub mint_authority: Option<String>,
    pub rpc_url: Option<String>,
}

/// Burn tokens from the signer's own account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnOptions {
    pub mint_address: String,
    pub amount: String,
    pub rpc_url: Option<String>,
}

/// Move tokens out of any holder's account using the permanent delegate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceTransferOptions {
    pub mint_address: String,
    pub from_address: String,
    pub recipient_address: String,
    pub amount: String,
    /// Expected permanent delegate. Defaults to the signer.
    pub permanent_delegate: Option<String>,
    pub rpc_url: Option<String>,
}

/// Burn tokens from any holder's account using the permanent delegate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceBurnOptions {
    pub mint_address: String,
    pub from_address: String,
    pub amount: String,
    /// Expected permanent delegate. Defaults to the signer.
    pub permanent_delegate: Option<String>,
    pub rpc_url: Option<String>,
}

/// Freeze or thaw a wallet's token account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeOptions {
    pub mint_address: String,
    pub wallet_address: String,
    /// Expected freeze authority. Defaults to the signer.
    pub freeze_authority: Option<String>,
    pub rpc_url: Option<String>,
}

/// Pause or resume every transfer of a pausable mint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseOptions {
    pub mint_address: String,
    /// Expected pause authority. Defaults to the signer.
    pub pause_authority: Option<String>,
    pub rpc_url: Option<String>,
}

/// Hand an authority role to a new address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorityOptions {
    pub mint_address: String,
    pub role: AuthorityRole,
    pub new_authority: String,
    /// Expected current holder of the role. Defaults to the signer.
    pub current_authority: Option<String>,
    pub rpc_url: Option<String>,
}

/// Revoke an authority role permanently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAuthorityOptions {
    pub mint_address: String,
    pub role: AuthorityRole,
    /// Expected current holder of the role. Defaults to the signer.
    pub current_authority: Option<String>,
    pub rpc_url: Option<String>,
}

/// Plain transfer from the signer to a recipient wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    pub mint_address: String,
    pub recipient: String,
    pub amount: String,
    pub rpc_url: Option<String>,
}

/// Close the signer's empty token account and reclaim its rent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseAccountOptions {
    pub mint_address: String,
    /// Rent recipient. Defaults to the signer.
    pub destination: Option<String>,
    pub rpc_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let options: ForceBurnOptions = serde_json::from_value(json!({
            "mintAddress": "mint",
            "fromAddress": "holder",
            "amount": "5",
            "permanentDelegate": "delegate"
        }))
        .unwrap();

        assert_eq!(options.from_address, "holder");
        assert_eq!(options.permanent_delegate.as_deref(), Some("delegate"));
        assert_eq!(options.rpc_url, None);
    }

    #[test]
    fn test_authority_options_carry_role() {
        let options: UpdateAuthorityOptions = serde_json::from_value(json!({
            "mintAddress": "mint",
            "role": "scaled-ui-amount",
            "newAuthority": "next"
        }))
        .unwrap();

        assert_eq!(options.role, AuthorityRole::ScaledUiAmount);
        assert!(options.current_authority.is_none());
    }
}
