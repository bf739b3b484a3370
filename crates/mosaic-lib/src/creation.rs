//! Validation for the token creation flow.
//!
//! Template defaults are merged with the caller's toggles first; every
//! conflict check then runs against the merged configuration. Nothing here
//! touches the network.

use crate::error::ActionError;
use crate::validation::{validate_address, validate_optional_address};
use chrono::Utc;
use mosaic_types::{
    CreateTokenOptions, ExtensionConfig, ScaledUiAmountConfig, ScaledUiAmountMode,
};
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{extension::ExtensionType, state::Mint};
use tracing::debug;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_DECIMALS: u8 = 9;
pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

const URI_SCHEMES: [&str; 4] = ["https://", "http://", "ipfs://", "ar://"];

/// Creation options after template defaults were applied and every check
/// passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCreateOptions {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub uri: Option<String>,
    pub extensions: ExtensionConfig,
    pub maximum_fee: Option<u64>,
    pub transfer_hook_program: Option<Pubkey>,
}

impl ResolvedCreateOptions {
    /// Whether accounts are created frozen; always true for ACL-gated mints.
    pub fn default_account_frozen(&self) -> bool {
        self.extensions.default_account_frozen.unwrap_or(false)
    }
}

/// Merge template defaults, then check names, authorities and extension
/// combinations.
pub fn validate_create_options(
    options: &CreateTokenOptions,
) -> Result<ResolvedCreateOptions, ActionError> {
    let mut extensions = options
        .extensions
        .merged_over(&options.template.extensions());
    debug!(template = %options.template, "Resolved creation extensions");

    let name = options.name.trim();
    let symbol = options.symbol.trim();
    if name.is_empty() {
        return Err(ActionError::validation("Token name is required"));
    }
    if symbol.is_empty() {
        return Err(ActionError::validation("Token symbol is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ActionError::validation(format!(
            "Token name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(ActionError::validation(format!(
            "Token symbol must be at most {MAX_SYMBOL_LEN} characters"
        )));
    }
    if options.decimals > MAX_DECIMALS {
        return Err(ActionError::validation(format!(
            "Decimals must be between 0 and {MAX_DECIMALS}"
        )));
    }

    let uri = options
        .uri
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    if let Some(uri) = uri {
        if !URI_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
            return Err(ActionError::validation(format!(
                "Metadata URI must use http(s), ipfs or ar: {uri}"
            )));
        }
    }

    for (value, field) in [
        (&options.mint_authority, "mint authority"),
        (&options.freeze_authority, "freeze authority"),
        (&options.metadata_authority, "metadata authority"),
        (&options.pause_authority, "pause authority"),
        (&options.permanent_delegate, "permanent delegate"),
        (&options.confidential_balances_authority, "confidential balances authority"),
        (&options.scaled_ui_amount_authority, "scaled UI amount authority"),
    ] {
        validate_optional_address(value.as_deref(), field)?;
    }

    let non_transferable = extensions.non_transferable.unwrap_or(false);
    if non_transferable {
        if extensions.transfer_fee.is_some() {
            return Err(conflict("Non-transferable", "transfer fees"));
        }
        if extensions.transfer_hook_program.is_some() {
            return Err(conflict("Non-transferable", "a transfer hook"));
        }
        if extensions.confidential_balances.unwrap_or(false) {
            return Err(conflict("Non-transferable", "confidential balances"));
        }
    }
    if extensions.interest_rate_bps.is_some() && extensions.scaled_ui_amount.is_some() {
        return Err(conflict("Interest-bearing", "scaled UI amount"));
    }

    let maximum_fee = match &extensions.transfer_fee {
        Some(fee) => {
            if fee.fee_basis_points > MAX_FEE_BASIS_POINTS {
                return Err(ActionError::validation(format!(
                    "Transfer fee must be at most {MAX_FEE_BASIS_POINTS} basis points"
                )));
            }
            let parsed = fee.maximum_fee.trim().parse::<u64>().map_err(|_| {
                ActionError::validation(format!(
                    "Maximum transfer fee must be a non-negative integer: {}",
                    fee.maximum_fee
                ))
            })?;
            Some(parsed)
        }
        None => None,
    };

    if let Some(rate) = extensions.interest_rate_bps {
        if i16::try_from(rate).is_err() {
            return Err(ActionError::validation(format!(
                "Interest rate must be between {} and {} basis points",
                i16::MIN,
                i16::MAX
            )));
        }
    }

    let transfer_hook_program = match extensions.transfer_hook_program.as_deref() {
        Some(program) => Some(validate_address(program, "transfer hook program")?),
        None => None,
    };

    if let Some(scaled) = &extensions.scaled_ui_amount {
        validate_scaled_ui_amount(scaled, Utc::now().timestamp())?;
    }

    if extensions.acl_mode.is_some() {
        if extensions.default_account_frozen == Some(false) {
            return Err(ActionError::validation(
                "Access control lists require accounts to be frozen by default",
            ));
        }
        extensions.default_account_frozen = Some(true);
    }

    Ok(ResolvedCreateOptions {
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals: options.decimals,
        uri: uri.map(str::to_string),
        extensions,
        maximum_fee,
        transfer_hook_program,
    })
}

fn validate_scaled_ui_amount(config: &ScaledUiAmountConfig, now: i64) -> Result<(), ActionError> {
    if !config.multiplier.is_finite() || config.multiplier <= 0.0 {
        return Err(ActionError::validation(
            "Scaled UI amount multiplier must be a positive number",
        ));
    }
    if config.mode == ScaledUiAmountMode::Static {
        return Ok(());
    }

    let new_multiplier = config.new_multiplier.ok_or_else(|| {
        ActionError::validation(format!(
            "A new multiplier is required for {} scaled UI amount",
            config.mode
        ))
    })?;
    if !new_multiplier.is_finite() || new_multiplier <= 0.0 {
        return Err(ActionError::validation(
            "New scaled UI amount multiplier must be a positive number",
        ));
    }

    let effective = config
        .new_multiplier_effective_timestamp
        .filter(|ts| *ts > 0)
        .ok_or_else(|| {
            ActionError::validation(
                "New multiplier effective timestamp must be a positive Unix timestamp",
            )
        })?;
    if config.mode == ScaledUiAmountMode::Scheduled && effective <= now {
        return Err(ActionError::validation(
            "Scheduled multiplier change must take effect in the future",
        ));
    }
    Ok(())
}

fn conflict(left: &str, right: &str) -> ActionError {
    ActionError::validation(format!("{left} tokens cannot use {right}"))
}

/// Token-2022 extensions a mint with this configuration carries.
///
/// Token metadata itself is variable length and written after
/// initialization, so only its pointer is listed.
pub fn mint_extension_types(extensions: &ExtensionConfig) -> Vec<ExtensionType> {
    let enabled = |toggle: Option<bool>| toggle.unwrap_or(false);
    let mut types = Vec::new();

    if enabled(extensions.metadata) {
        types.push(ExtensionType::MetadataPointer);
    }
    if enabled(extensions.pausable) {
        types.push(ExtensionType::Pausable);
    }
    if enabled(extensions.permanent_delegate) {
        types.push(ExtensionType::PermanentDelegate);
    }
    if enabled(extensions.confidential_balances) {
        types.push(ExtensionType::ConfidentialTransferMint);
    }
    if enabled(extensions.non_transferable) {
        types.push(ExtensionType::NonTransferable);
    }
    if enabled(extensions.default_account_frozen) || extensions.acl_mode.is_some() {
        types.push(ExtensionType::DefaultAccountState);
    }
    if extensions.transfer_fee.is_some() {
        types.push(ExtensionType::TransferFeeConfig);
    }
    if extensions.interest_rate_bps.is_some() {
        types.push(ExtensionType::InterestBearingConfig);
    }
    if extensions.transfer_hook_program.is_some() {
        types.push(ExtensionType::TransferHook);
    }
    if extensions.scaled_ui_amount.is_some() {
        types.push(ExtensionType::ScaledUiAmount);
    }
    types
}

/// Size in bytes of the mint account before metadata is appended.
pub fn mint_account_space(extensions: &ExtensionConfig) -> Result<usize, ActionError> {
    ExtensionType::try_calculate_account_len::<Mint>(&mint_extension_types(extensions))
        .map_err(|e| ActionError::validation(format!("Failed to compute mint account size: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_types::{AclMode, TokenTemplate, TransferFeeConfig};
    use rstest::rstest;
    use solana_program::program_pack::Pack;

    fn base_options() -> CreateTokenOptions {
        CreateTokenOptions {
            name: "Mosaic Dollar".to_string(),
            symbol: "MUSD".to_string(),
            decimals: 6,
            ..CreateTokenOptions::default()
        }
    }

    #[test]
    fn test_custom_template_passes() {
        let resolved = validate_create_options(&base_options()).unwrap();
        assert_eq!(resolved.symbol, "MUSD");
        assert_eq!(resolved.extensions.metadata, Some(true));
        assert!(!resolved.default_account_frozen());
    }

    #[test]
    fn test_acl_template_forces_default_frozen() {
        let options = CreateTokenOptions {
            template: TokenTemplate::Stablecoin,
            ..base_options()
        };
        let resolved = validate_create_options(&options).unwrap();
        assert!(resolved.default_account_frozen());
        assert!(mint_extension_types(&resolved.extensions)
            .contains(&ExtensionType::DefaultAccountState));
    }

    #[test]
    fn test_acl_with_explicitly_unfrozen_accounts_conflicts() {
        let mut options = base_options();
        options.extensions.acl_mode = Some(AclMode::Allowlist);
        options.extensions.default_account_frozen = Some(false);

        let err = validate_create_options(&options).unwrap_err();
        assert!(err.to_string().contains("frozen by default"));
    }

    #[rstest]
    #[case::transfer_fee(ExtensionConfig {
        transfer_fee: Some(TransferFeeConfig { fee_basis_points: 50, maximum_fee: "100".into() }),
        ..ExtensionConfig::default()
    }, "transfer fees")]
    #[case::transfer_hook(ExtensionConfig {
        transfer_hook_program: Some(Pubkey::new_unique().to_string()),
        ..ExtensionConfig::default()
    }, "a transfer hook")]
    #[case::confidential(ExtensionConfig {
        confidential_balances: Some(true),
        ..ExtensionConfig::default()
    }, "confidential balances")]
    fn test_non_transferable_conflicts(#[case] extra: ExtensionConfig, #[case] conflicting: &str) {
        let mut options = base_options();
        options.extensions = ExtensionConfig {
            non_transferable: Some(true),
            ..extra
        };

        let err = validate_create_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Non-transferable tokens cannot use {conflicting}")
        );
    }

    #[test]
    fn test_interest_and_scaled_amount_conflict() {
        let options = CreateTokenOptions {
            template: TokenTemplate::TokenizedSecurity,
            extensions: ExtensionConfig {
                interest_rate_bps: Some(500),
                ..ExtensionConfig::default()
            },
            ..base_options()
        };
        let err = validate_create_options(&options).unwrap_err();
        assert!(err.to_string().starts_with("Interest-bearing tokens"));
    }

    #[rstest]
    #[case("", "MUSD", 6, "name is required")]
    #[case("Mosaic", "", 6, "symbol is required")]
    #[case("Mosaic", "TOOLONGSYMBOL", 6, "at most 10")]
    #[case("Mosaic", "MUSD", 10, "between 0 and 9")]
    fn test_basic_field_checks(
        #[case] name: &str,
        #[case] symbol: &str,
        #[case] decimals: u8,
        #[case] expected: &str,
    ) {
        let options = CreateTokenOptions {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            ..CreateTokenOptions::default()
        };
        let err = validate_create_options(&options).unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_uri_and_authority_checks() {
        let mut options = base_options();
        options.uri = Some("ftp://example.com/meta.json".to_string());
        assert!(validate_create_options(&options).is_err());

        options.uri = Some("ipfs://bafy".to_string());
        assert!(validate_create_options(&options).is_ok());

        options.pause_authority = Some("nope".to_string());
        let err = validate_create_options(&options).unwrap_err();
        assert_eq!(err.to_string(), "Invalid pause authority address: nope");
    }

    #[test]
    fn test_fee_and_interest_bounds() {
        let mut options = base_options();
        options.extensions.transfer_fee = Some(TransferFeeConfig {
            fee_basis_points: 10_001,
            maximum_fee: "1".to_string(),
        });
        assert!(validate_create_options(&options).is_err());

        options.extensions.transfer_fee = Some(TransferFeeConfig {
            fee_basis_points: 25,
            maximum_fee: "-5".to_string(),
        });
        assert!(validate_create_options(&options).is_err());

        options.extensions.transfer_fee = Some(TransferFeeConfig {
            fee_basis_points: 25,
            maximum_fee: "5000".to_string(),
        });
        let resolved = validate_create_options(&options).unwrap();
        assert_eq!(resolved.maximum_fee, Some(5000));

        options.extensions.interest_rate_bps = Some(40_000);
        assert!(validate_create_options(&options).is_err());
    }

    #[test]
    fn test_scaled_ui_amount_schedule() {
        let now = 1_800_000_000;
        let scheduled = |ts: Option<i64>, multiplier: Option<f64>| ScaledUiAmountConfig {
            mode: ScaledUiAmountMode::Scheduled,
            multiplier: 1.0,
            new_multiplier: multiplier,
            new_multiplier_effective_timestamp: ts,
        };

        assert!(validate_scaled_ui_amount(&scheduled(Some(now + 60), Some(2.0)), now).is_ok());
        assert!(validate_scaled_ui_amount(&scheduled(Some(now - 60), Some(2.0)), now).is_err());
        assert!(validate_scaled_ui_amount(&scheduled(Some(now + 60), None), now).is_err());
        assert!(validate_scaled_ui_amount(&scheduled(None, Some(2.0)), now).is_err());

        let rebasing = ScaledUiAmountConfig {
            mode: ScaledUiAmountMode::Rebasing,
            ..scheduled(Some(now - 60), Some(1.5))
        };
        assert!(validate_scaled_ui_amount(&rebasing, now).is_ok());

        let bad = ScaledUiAmountConfig {
            multiplier: f64::NAN,
            ..ScaledUiAmountConfig::default()
        };
        assert!(validate_scaled_ui_amount(&bad, now).is_err());
    }

    #[test]
    fn test_mint_space_grows_with_extensions() {
        let plain = mint_account_space(&ExtensionConfig::default()).unwrap();
        assert_eq!(plain, Mint::LEN);

        let regulated = mint_account_space(&TokenTemplate::Stablecoin.extensions()).unwrap();
        assert!(regulated > spl_token_2022::state::Account::LEN);
    }
}
