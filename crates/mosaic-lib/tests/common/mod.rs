//! In-memory chain, connector and signers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mosaic_lib::{
    ActionError, ActionExecutor, MosaicConfig, RpcConnection, RpcConnector, RpcEndpoint,
    RpcError, TransactionDraft, TransactionSigner,
};
use solana_program::{program_option::COption, program_pack::Pack};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use spl_pod::{optional_keys::OptionalNonZeroPubkey, primitives::PodBool};
use spl_token_2022::{
    extension::{
        pausable::PausableConfig, permanent_delegate::PermanentDelegate,
        BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut,
    },
    state::{Account as TokenAccount, AccountState, Mint},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Accounts plus counters for every network touch.
#[derive(Default)]
pub struct MockChain {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    submitted: Mutex<Vec<Transaction>>,
    endpoints: Mutex<Vec<String>>,
    send_error: Mutex<Option<String>>,
    pub connects: AtomicUsize,
    pub account_reads: AtomicUsize,
    pub blockhash_fetches: AtomicUsize,
    pub submissions: AtomicUsize,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, address: Pubkey, account: Account) {
        self.accounts
            .lock()
            .unwrap()
            .insert(address, account);
    }

    pub fn fail_sends_with(&self, message: &str) {
        *self.send_error.lock().unwrap() = Some(message.to_string());
    }

    /// Total RPC traffic, including connection construction.
    pub fn network_calls(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
            + self.account_reads.load(Ordering::SeqCst)
            + self.blockhash_fetches.load(Ordering::SeqCst)
            + self.submissions.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }
}

pub struct MockRpc {
    chain: Arc<MockChain>,
    url: String,
}

#[async_trait]
impl RpcConnection for MockRpc {
    fn url(&self) -> &str {
        &self.url
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        self.chain.blockhash_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        self.chain.account_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.chain.accounts.lock().unwrap().get(address).cloned())
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, RpcError> {
        self.chain.submissions.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.chain.send_error.lock().unwrap().clone() {
            return Err(RpcError::CustomError(message));
        }
        self.chain.submitted.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }
}

pub struct MockConnector {
    pub chain: Arc<MockChain>,
}

impl RpcConnector for MockConnector {
    fn connect(
        &self,
        endpoint: &RpcEndpoint,
        _commitment: CommitmentConfig,
    ) -> Result<Box<dyn RpcConnection>, RpcError> {
        self.chain.connects.fetch_add(1, Ordering::SeqCst);
        self.chain
            .endpoints
            .lock()
            .unwrap()
            .push(endpoint.http_url.clone());
        Ok(Box::new(MockRpc {
            chain: self.chain.clone(),
            url: endpoint.http_url.clone(),
        }))
    }
}

pub fn executor(chain: &Arc<MockChain>) -> ActionExecutor<MockConnector> {
    ActionExecutor::new(
        MockConnector {
            chain: chain.clone(),
        },
        MosaicConfig::default(),
    )
}

/// Signer that knows its address but refuses every signature.
pub struct RejectingSigner(pub Pubkey);

#[async_trait]
impl TransactionSigner for RejectingSigner {
    fn address(&self) -> Option<Pubkey> {
        Some(self.0)
    }

    async fn sign_transaction(
        &self,
        _draft: &TransactionDraft,
    ) -> Result<Transaction, ActionError> {
        Err(ActionError::Signing("User rejected the request".to_string()))
    }
}

/// Mint layout for fixtures.
#[derive(Debug, Clone)]
pub struct MintFixture {
    pub decimals: u8,
    pub supply: u64,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub permanent_delegate: Option<Option<Pubkey>>,
    /// `(authority, paused)`
    pub pausable: Option<(Option<Pubkey>, bool)>,
}

impl Default for MintFixture {
    fn default() -> Self {
        Self {
            decimals: 6,
            supply: 1_000_000_000,
            mint_authority: None,
            freeze_authority: None,
            permanent_delegate: None,
            pausable: None,
        }
    }
}

fn optional_key(key: Option<Pubkey>) -> OptionalNonZeroPubkey {
    OptionalNonZeroPubkey::try_from(key).unwrap()
}

fn to_coption(key: Option<Pubkey>) -> COption<Pubkey> {
    match key {
        Some(key) => COption::Some(key),
        None => COption::None,
    }
}

impl MintFixture {
    pub fn pack(&self) -> Vec<u8> {
        let mut extensions = Vec::new();
        if self.permanent_delegate.is_some() {
            extensions.push(ExtensionType::PermanentDelegate);
        }
        if self.pausable.is_some() {
            extensions.push(ExtensionType::Pausable);
        }

        let space = ExtensionType::try_calculate_account_len::<Mint>(&extensions).unwrap();
        let mut data = vec![0u8; space];
        let mut state = StateWithExtensionsMut::<Mint>::unpack_uninitialized(&mut data).unwrap();
        state.base = Mint {
            mint_authority: to_coption(self.mint_authority),
            supply: self.supply,
            decimals: self.decimals,
            is_initialized: true,
            freeze_authority: to_coption(self.freeze_authority),
        };
        state.pack_base();
        if !extensions.is_empty() {
            state.init_account_type().unwrap();
        }

        if let Some(delegate) = self.permanent_delegate {
            let extension = state.init_extension::<PermanentDelegate>(true).unwrap();
            extension.delegate = optional_key(delegate);
        }
        if let Some((authority, paused)) = self.pausable {
            let extension = state.init_extension::<PausableConfig>(true).unwrap();
            extension.authority = optional_key(authority);
            extension.paused = PodBool::from(paused);
        }
        data
    }

    pub fn account(&self) -> Account {
        token_program_account(self.pack())
    }
}

pub fn token_account_data(mint: Pubkey, owner: Pubkey, amount: u64, frozen: bool) -> Vec<u8> {
    let account = TokenAccount {
        mint,
        owner,
        amount,
        delegate: COption::None,
        state: if frozen {
            AccountState::Frozen
        } else {
            AccountState::Initialized
        },
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(account, &mut data).unwrap();
    data
}

fn token_program_account(data: Vec<u8>) -> Account {
    Account {
        lamports: 2_039_280,
        data,
        owner: spl_token_2022::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// A test world: one mint plus the signer.
pub struct World {
    pub chain: Arc<MockChain>,
    pub signer: Keypair,
    pub mint: Pubkey,
}

impl World {
    /// `fixture` receives the signer's address so it can hand out roles.
    pub fn new(fixture: impl FnOnce(Pubkey) -> MintFixture) -> Self {
        let chain = MockChain::new();
        let signer = Keypair::new();
        let mint = Pubkey::new_unique();
        chain.insert(mint, fixture(signer.pubkey()).account());
        Self {
            chain,
            signer,
            mint,
        }
    }

    pub fn signer_address(&self) -> Pubkey {
        self.signer.pubkey()
    }

    /// Give `wallet` an associated token account for the world's mint.
    pub fn fund(&self, wallet: &Pubkey, amount: u64, frozen: bool) -> Pubkey {
        let address = mosaic_lib::associated_token_address(wallet, &self.mint);
        self.chain.insert(
            address,
            token_program_account(token_account_data(self.mint, *wallet, amount, frozen)),
        );
        address
    }
}
