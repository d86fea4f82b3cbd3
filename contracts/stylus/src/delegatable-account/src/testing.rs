//! Deterministic keys, signing helpers and in-memory state for tests.

use alloc::{collections::BTreeMap, vec::Vec};

use delegatable_account_types::{
    encode_signature_entries, Delegation, Eip712Domain, SignatureEntry, SignedDelegation,
    SignerSet, TypedStruct, DOMAIN_VERSION,
};
use k256::ecdsa::SigningKey;
use stylus_sdk::alloy_primitives::{keccak256, Address, FixedBytes, U256};

use crate::{authority::AuthorityState, errors::ValidationError, store::SignerStore};

pub const CHAIN_ID: u64 = 31337;

pub fn key(seed: u8) -> (SigningKey, Address) {
    let signing_key = SigningKey::from_slice(&[seed; 32]).unwrap();
    let address = address_of(&signing_key);
    (signing_key, address)
}

pub fn address_of(signing_key: &SigningKey) -> Address {
    let point = signing_key.verifying_key().to_encoded_point(false);
    Address::from_slice(&keccak256(&point.as_bytes()[1..])[12..])
}

/// `r||s||v` over a prehashed digest, `v` in {27,28}.
pub fn sign(signing_key: &SigningKey, digest: FixedBytes<32>) -> Vec<u8> {
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest.as_slice()).unwrap();
    let mut out = signature.to_bytes().to_vec();
    out.push(recovery_id.to_byte() + 27);
    out
}

pub fn ecdsa_entry(signing_key: &SigningKey, digest: FixedBytes<32>) -> SignatureEntry {
    SignatureEntry::ecdsa(sign(signing_key, digest))
}

pub fn domain(account: Address) -> Eip712Domain {
    Eip712Domain::new("Smart Account", DOMAIN_VERSION, CHAIN_ID, account)
}

pub fn sign_delegation(
    domain: &Eip712Domain,
    delegation: Delegation,
    signer: Address,
    keys: &[&SigningKey],
) -> SignedDelegation {
    let digest = delegation.signing_hash(domain).unwrap();
    let entries: Vec<SignatureEntry> = keys.iter().map(|k| ecdsa_entry(k, digest)).collect();
    SignedDelegation {
        message: delegation,
        signature: encode_signature_entries(&entries).into(),
        signer,
    }
}

/// Accounts not registered here are treated as externally-owned.
#[derive(Default)]
pub struct MemoryAuthority {
    sets: BTreeMap<Address, SignerSet>,
    contract_signatures: Vec<(Address, FixedBytes<32>)>,
}

impl MemoryAuthority {
    pub fn with_set(mut self, account: Address, owners: &[Address], threshold: u64) -> Self {
        let set = SignerSet::new(owners.to_vec(), U256::from(threshold)).unwrap();
        self.sets.insert(account, set);
        self
    }

    pub fn accepting_contract_signature(mut self, signer: Address, digest: FixedBytes<32>) -> Self {
        self.contract_signatures.push((signer, digest));
        self
    }

    pub fn replace_set(&mut self, account: Address, owners: &[Address], threshold: u64) {
        let set = SignerSet::new(owners.to_vec(), U256::from(threshold)).unwrap();
        self.sets.insert(account, set);
    }
}

impl AuthorityState for MemoryAuthority {
    fn signer_set(&self, account: Address) -> Result<SignerSet, ValidationError> {
        Ok(self
            .sets
            .get(&account)
            .cloned()
            .unwrap_or_else(|| SignerSet::single(account)))
    }

    fn is_valid_contract_signature(
        &self,
        signer: Address,
        digest: FixedBytes<32>,
        _signature: &[u8],
    ) -> bool {
        self.contract_signatures.contains(&(signer, digest))
    }
}

pub struct MemoryStore {
    pub set: SignerSet,
    pub nonce: U256,
    pub commits: usize,
}

impl MemoryStore {
    pub fn new(owners: &[Address], threshold: u64) -> Self {
        Self {
            set: SignerSet::new(owners.to_vec(), U256::from(threshold)).unwrap(),
            nonce: U256::ZERO,
            commits: 0,
        }
    }
}

impl SignerStore for MemoryStore {
    fn signer_set(&self) -> Result<SignerSet, ValidationError> {
        Ok(self.set.clone())
    }

    fn signer_nonce(&self) -> U256 {
        self.nonce
    }

    fn commit_signers(&mut self, set: &SignerSet, nonce: U256) {
        self.set = set.clone();
        self.nonce = nonce;
        self.commits += 1;
    }
}
