//! On-chain authority roles a Token-2022 mint can carry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Which authority slot of a mint an update or revoke action targets.
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AuthorityRole {
    /// Authority allowed to mint new supply
    Mint,
    /// Authority allowed to freeze and thaw token accounts
    Freeze,
    /// Authority allowed to pause and resume all transfers
    Pause,
    /// Delegate with standing transfer/burn rights over every holder
    PermanentDelegate,
    /// Authority over the confidential-transfer mint configuration
    ConfidentialTransfer,
    /// Authority allowed to change the scaled UI amount multiplier
    ScaledUiAmount,
    /// Authority over the metadata pointer
    Metadata,
}

impl AuthorityRole {
    /// Human-readable name used in error messages, e.g. "pause authority".
    pub fn label(&self) -> &'static str {
        match self {
            AuthorityRole::Mint => "mint authority",
            AuthorityRole::Freeze => "freeze authority",
            AuthorityRole::Pause => "pause authority",
            AuthorityRole::PermanentDelegate => "permanent delegate",
            AuthorityRole::ConfidentialTransfer => "confidential transfer authority",
            AuthorityRole::ScaledUiAmount => "scaled UI amount authority",
            AuthorityRole::Metadata => "metadata authority",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_names_round_trip_through_strum_and_serde() {
        for role in AuthorityRole::iter() {
            let name = role.to_string();
            assert_eq!(AuthorityRole::from_str(&name).unwrap(), role);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn test_kebab_case_names() {
        assert_eq!(AuthorityRole::PermanentDelegate.to_string(), "permanent-delegate");
        assert_eq!(AuthorityRole::ScaledUiAmount.to_string(), "scaled-ui-amount");
        assert!(AuthorityRole::from_str("pause").is_ok());
        assert!(AuthorityRole::from_str("owner").is_err());
    }

    #[test]
    fn test_labels_name_the_authority() {
        assert_eq!(AuthorityRole::Pause.label(), "pause authority");
        assert_eq!(AuthorityRole::PermanentDelegate.label(), "permanent delegate");
    }
}
