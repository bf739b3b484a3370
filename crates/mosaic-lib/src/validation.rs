//! Local option checks shared by every action.
//!
//! Nothing here touches the network, so every failure is reported before
//! the pipeline constructs an RPC client.

use crate::error::ActionError;
use mosaic_types::AuthorityRole;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Parse a required address field. `field` is a lowercase noun such as
/// `"mint"` or `"recipient"`.
pub fn validate_address(value: &str, field: &str) -> Result<Pubkey, ActionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ActionError::validation(format!(
            "{} address is required",
            capitalize(field)
        )));
    }
    Pubkey::from_str(trimmed).map_err(|_| {
        ActionError::validation(format!("Invalid {field} address: {trimmed}"))
    })
}

/// Parse an optional address field; blank counts as absent.
pub fn validate_optional_address(
    value: Option<&str>,
    field: &str,
) -> Result<Option<Pubkey>, ActionError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => validate_address(v, field).map(Some),
        None => Ok(None),
    }
}

/// Check that `value` is a plain positive decimal such as `"100"` or
/// `"0.25"`. Zero, negatives, exponents and non-numbers are rejected.
pub fn validate_amount(value: &str) -> Result<f64, ActionError> {
    let trimmed = value.trim();
    let invalid = || ActionError::validation("Amount must be a positive number");

    split_decimal(trimmed).ok_or_else(invalid)?;
    let parsed: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Convert a decimal UI amount to base units for a mint with `decimals`
/// places. Trailing zeros do not count as precision, so `"1.500"` fits a
/// two-decimal mint.
pub fn decimal_to_base_units(amount: &str, decimals: u8) -> Result<u64, ActionError> {
    let trimmed = amount.trim();
    let (_, fraction) = split_decimal(trimmed)
        .ok_or_else(|| ActionError::validation("Amount must be a positive number"))?;

    let total = spl_token_2022::try_ui_amount_into_amount(trimmed.to_string(), decimals)
        .map_err(|_| {
            if fraction.trim_end_matches('0').len() > decimals as usize {
                ActionError::validation(format!(
                    "Amount {trimmed} has more than {decimals} decimal places"
                ))
            } else {
                ActionError::validation(format!("Amount {trimmed} is too large"))
            }
        })?;

    if total == 0 {
        return Err(ActionError::validation("Amount must be a positive number"));
    }
    Ok(total)
}

/// Render base units back to a decimal string, trimming trailing zeros.
pub fn base_units_to_decimal(amount: u64, decimals: u8) -> String {
    spl_token_2022::amount_to_ui_amount_string_trimmed(amount, decimals)
}

/// Split `"12.50"` into `("12", "50")`; `None` unless the value is digits
/// with at most one dot and at least one digit overall.
fn split_decimal(value: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Who must sign for an authority-gated action.
///
/// A caller may name the authority it expects; when it does not, the
/// expected authority is the signer itself and the local check passes
/// trivially. The on-chain check in `build_transaction` still applies in
/// both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityRequirement {
    Explicit(Pubkey),
    DefaultedToSigner,
}

impl AuthorityRequirement {
    pub fn from_option(value: Option<&str>, role: AuthorityRole) -> Result<Self, ActionError> {
        Ok(match validate_optional_address(value, role.label())? {
            Some(authority) => Self::Explicit(authority),
            None => Self::DefaultedToSigner,
        })
    }

    /// The address the action expects to hold the authority.
    pub fn expected(&self, signer: &Pubkey) -> Pubkey {
        match self {
            Self::Explicit(authority) => *authority,
            Self::DefaultedToSigner => *signer,
        }
    }

    /// Reject unless the signer is the expected authority. `action` reads
    /// as a verb phrase, e.g. `"force burn tokens"`.
    pub fn ensure_signer(
        &self,
        signer: &Pubkey,
        role: AuthorityRole,
        action: &str,
    ) -> Result<(), ActionError> {
        let expected = self.expected(signer);
        if expected == *signer {
            return Ok(());
        }
        Err(ActionError::Unauthorized(format!(
            "Only the {label} can {action}. \
             Connected wallet {signer} is not the {label} {expected}",
            label = role.label()
        )))
    }
}
