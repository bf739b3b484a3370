//! Decoding Token-2022 mints that carry extensions.

mod common;

use common::{token_account_data, MintFixture};
use mosaic_lib::mint_state::{MintSnapshot, RoleSlot, TokenAccountSnapshot};
use mosaic_lib::AuthorityRole;
use solana_sdk::pubkey::Pubkey;

#[test]
fn test_extension_roles_are_decoded() {
    let delegate = Pubkey::new_unique();
    let pauser = Pubkey::new_unique();
    let fixture = MintFixture {
        decimals: 2,
        permanent_delegate: Some(Some(delegate)),
        pausable: Some((Some(pauser), true)),
        ..MintFixture::default()
    };

    let address = Pubkey::new_unique();
    let snapshot = MintSnapshot::from_account(&address, &fixture.account()).unwrap();

    assert_eq!(snapshot.decimals, 2);
    assert_eq!(snapshot.permanent_delegate, RoleSlot::Held(delegate));
    assert_eq!(snapshot.pause_authority, RoleSlot::Held(pauser));
    assert_eq!(snapshot.paused, Some(true));
    assert_eq!(snapshot.mint_authority, RoleSlot::Revoked);
    assert_eq!(snapshot.metadata_authority, RoleSlot::Missing);
}

#[test]
fn test_revoked_extension_authority() {
    let fixture = MintFixture {
        permanent_delegate: Some(None),
        ..MintFixture::default()
    };
    let address = Pubkey::new_unique();
    let snapshot = MintSnapshot::from_account(&address, &fixture.account()).unwrap();

    assert_eq!(snapshot.permanent_delegate, RoleSlot::Revoked);
    let err = snapshot
        .ensure_authority(AuthorityRole::PermanentDelegate, &Pubkey::new_unique())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("The permanent delegate of mint {address} has been revoked")
    );
}

#[test]
fn test_token_account_snapshot() {
    let mint = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let address = Pubkey::new_unique();

    let snapshot =
        TokenAccountSnapshot::unpack(&address, &token_account_data(mint, owner, 77, true)).unwrap();
    assert_eq!(snapshot.mint, mint);
    assert_eq!(snapshot.owner, owner);
    assert_eq!(snapshot.amount, 77);
    assert!(snapshot.is_frozen);

    assert!(TokenAccountSnapshot::unpack(&address, &[0u8; 10]).is_err());
}
