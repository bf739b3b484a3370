//! The normalized result every action returns, plus the action-specific
//! fields merged into a successful result.

use crate::authority::AuthorityRole;
use serde::{Deserialize, Serialize, Serializer};

/// Fallback text for failures that carry no readable message.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Outcome of one action attempt.
///
/// Serializes to `{"success":true,"transactionSignature":..,<details>}` or
/// `{"success":false,"error":..}`; the two shapes never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success {
        transaction_signature: String,
        details: T,
    },
    Failure {
        error: String,
    },
}

impl<T> ActionResult<T> {
    pub fn success(transaction_signature: impl Into<String>, details: T) -> Self {
        Self::Success {
            transaction_signature: transaction_signature.into(),
            details,
        }
    }

    /// Build a failure, substituting [`UNKNOWN_ERROR`] for blank messages.
    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            error
        };
        Self::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn transaction_signature(&self) -> Option<&str> {
        match self {
            Self::Success {
                transaction_signature,
                ..
            } => Some(transaction_signature),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn details(&self) -> Option<&T> {
        match self {
            Self::Success { details, .. } => Some(details),
            Self::Failure { .. } => None,
        }
    }

    /// Convert into a standard `Result` of `(signature, details)`.
    pub fn into_result(self) -> Result<(String, T), String> {
        match self {
            Self::Success {
                transaction_signature,
                details,
            } => Ok((transaction_signature, details)),
            Self::Failure { error } => Err(error),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessWire<'a, T> {
    success: bool,
    transaction_signature: &'a str,
    #[serde(flatten)]
    details: &'a T,
}

#[derive(Serialize)]
struct FailureWire<'a> {
    success: bool,
    error: &'a str,
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success {
                transaction_signature,
                details,
            } => SuccessWire {
                success: true,
                transaction_signature,
                details,
            }
            .serialize(serializer),
            Self::Failure { error } => FailureWire {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOutcome {
    pub minted_amount: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnOutcome {
    pub burned_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceTransferOutcome {
    pub transferred_amount: String,
    pub from_address: String,
    pub to_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceBurnOutcome {
    pub burned_amount: String,
    pub from_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeOutcome {
    pub frozen_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThawOutcome {
    pub thawed_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseOutcome {
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorityOutcome {
    pub role: AuthorityRole,
    pub new_authority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAuthorityOutcome {
    pub role: AuthorityRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub transferred_amount: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseAccountOutcome {
    pub closed_account: String,
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_flattens_details() {
        let result = ActionResult::success(
            "SIG123",
            MintOutcome {
                minted_amount: "100".to_string(),
                recipient: "wallet".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "transactionSignature": "SIG123",
                "mintedAmount": "100",
                "recipient": "wallet"
            })
        );
    }

    #[test]
    fn test_failure_has_only_error() {
        let result: ActionResult<MintOutcome> = ActionResult::failure("boom");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": false, "error": "boom" })
        );
        assert!(result.transaction_signature().is_none());
        assert!(result.details().is_none());
    }

    #[test]
    fn test_blank_failure_uses_fallback() {
        let result: ActionResult<PauseOutcome> = ActionResult::failure("   ");
        assert_eq!(result.error(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_into_result() {
        let ok = ActionResult::success("SIG", PauseOutcome { paused: true });
        assert_eq!(
            ok.into_result(),
            Ok(("SIG".to_string(), PauseOutcome { paused: true }))
        );
        let err: ActionResult<PauseOutcome> = ActionResult::failure("nope");
        assert_eq!(err.into_result(), Err("nope".to_string()));
    }
}
