//! Configuration for creating a new Token-2022 mint from one of the
//! Mosaic templates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Starting point for a new token. Each template switches on a set of
/// extensions before the caller's own toggles are applied.
#[derive(Debug, Clone, Copy, Default, Display, EnumString, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TokenTemplate {
    /// Metadata, pausable, permanent delegate, confidential balances, ACL
    Stablecoin,
    /// Stablecoin feature set plus a scaled UI amount
    TokenizedSecurity,
    /// Metadata, pausable, permanent delegate, allowlist-gated
    ArcadeToken,
    /// Nothing enabled beyond metadata
    #[default]
    Custom,
}

impl TokenTemplate {
    /// Extension toggles this template switches on.
    pub fn extensions(&self) -> ExtensionConfig {
        let regulated = ExtensionConfig {
            metadata: Some(true),
            pausable: Some(true),
            permanent_delegate: Some(true),
            ..ExtensionConfig::default()
        };
        match self {
            TokenTemplate::Stablecoin => ExtensionConfig {
                confidential_balances: Some(true),
                acl_mode: Some(AclMode::Blocklist),
                ..regulated
            },
            TokenTemplate::TokenizedSecurity => ExtensionConfig {
                confidential_balances: Some(true),
                acl_mode: Some(AclMode::Blocklist),
                scaled_ui_amount: Some(ScaledUiAmountConfig::default()),
                ..regulated
            },
            TokenTemplate::ArcadeToken => ExtensionConfig {
                acl_mode: Some(AclMode::Allowlist),
                ..regulated
            },
            TokenTemplate::Custom => ExtensionConfig {
                metadata: Some(true),
                ..ExtensionConfig::default()
            },
        }
    }
}

/// SRFC-37 access control list flavour.
#[derive(Debug, Clone, Copy, Display, EnumString, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AclMode {
    Allowlist,
    Blocklist,
}

/// How the scaled UI amount multiplier evolves.
#[derive(Debug, Clone, Copy, Default, Display, EnumString, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScaledUiAmountMode {
    #[default]
    Static,
    /// A new multiplier takes effect at a future timestamp
    Scheduled,
    /// The multiplier is periodically rebased
    Rebasing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFeeConfig {
    /// Fee in basis points of the transferred amount.
    pub fee_basis_points: u16,
    /// Cap on the fee, in base units, as a decimal integer string.
    pub maximum_fee: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledUiAmountConfig {
    #[serde(default)]
    pub mode: ScaledUiAmountMode,
    pub multiplier: f64,
    pub new_multiplier: Option<f64>,
    /// Unix timestamp at which `new_multiplier` takes effect.
    pub new_multiplier_effective_timestamp: Option<i64>,
}

impl Default for ScaledUiAmountConfig {
    fn default() -> Self {
        Self {
            mode: ScaledUiAmountMode::Static,
            multiplier: 1.0,
            new_multiplier: None,
            new_multiplier_effective_timestamp: None,
        }
    }
}

/// Extension toggles and parameters. `None` on a boolean toggle means "use
/// the template default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub metadata: Option<bool>,
    pub pausable: Option<bool>,
    pub permanent_delegate: Option<bool>,
    pub confidential_balances: Option<bool>,
    pub non_transferable: Option<bool>,
    /// Explicit DefaultAccountState choice; ACL-gated tokens need `true`.
    pub default_account_frozen: Option<bool>,
    pub transfer_fee: Option<TransferFeeConfig>,
    /// Interest rate in basis points, signed.
    pub interest_rate_bps: Option<i32>,
    /// Program id of the transfer hook.
    pub transfer_hook_program: Option<String>,
    pub scaled_ui_amount: Option<ScaledUiAmountConfig>,
    pub acl_mode: Option<AclMode>,
}

impl ExtensionConfig {
    /// Fill every unset field from `defaults`; fields set here win.
    pub fn merged_over(&self, defaults: &ExtensionConfig) -> ExtensionConfig {
        ExtensionConfig {
            metadata: self.metadata.or(defaults.metadata),
            pausable: self.pausable.or(defaults.pausable),
            permanent_delegate: self.permanent_delegate.or(defaults.permanent_delegate),
            confidential_balances: self.confidential_balances.or(defaults.confidential_balances),
            non_transferable: self.non_transferable.or(defaults.non_transferable),
            default_account_frozen: self.default_account_frozen.or(defaults.default_account_frozen),
            transfer_fee: self.transfer_fee.clone().or_else(|| defaults.transfer_fee.clone()),
            interest_rate_bps: self.interest_rate_bps.or(defaults.interest_rate_bps),
            transfer_hook_program: self
                .transfer_hook_program
                .clone()
                .or_else(|| defaults.transfer_hook_program.clone()),
            scaled_ui_amount: self
                .scaled_ui_amount
                .clone()
                .or_else(|| defaults.scaled_ui_amount.clone()),
            acl_mode: self.acl_mode.or(defaults.acl_mode),
        }
    }
}

/// Everything needed to describe a new mint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenOptions {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub uri: Option<String>,
    #[serde(default)]
    pub template: TokenTemplate,
    #[serde(default)]
    pub extensions: ExtensionConfig,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub metadata_authority: Option<String>,
    pub pause_authority: Option<String>,
    pub permanent_delegate: Option<String>,
    pub confidential_balances_authority: Option<String>,
    pub scaled_ui_amount_authority: Option<String>,
    pub rpc_url: Option<String>,
}
