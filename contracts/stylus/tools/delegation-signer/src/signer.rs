//! Explicit-key ECDSA signer.
//!
//! Keys are always handed in by the caller; nothing here reads wallets or environment.

use alloy_primitives::{keccak256, Address, B256};
use anyhow::{anyhow, Context, Result};
use delegatable_account_types::SignatureEntry;
use k256::ecdsa::SigningKey;

pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    pub fn new(key: SigningKey) -> Self {
        let point = key.verifying_key().to_encoded_point(false);
        let address = Address::from_slice(&keccak256(&point.as_bytes()[1..])[12..]);
        Self { key, address }
    }

    /// Parse a hex private key, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let raw = hex::decode(private_key.trim().trim_start_matches("0x"))
            .context("private key is not hex")?;
        let key = SigningKey::from_slice(&raw).map_err(|_| anyhow!("invalid secp256k1 private key"))?;
        Ok(Self::new(key))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `r||s||v` over an already-hashed digest, `v` in {27,28}.
    pub fn sign_digest(&self, digest: B256) -> Result<Vec<u8>> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| anyhow!("signing failed: {e}"))?;
        let mut out = signature.to_bytes().to_vec();
        out.push(recovery_id.to_byte() + 27);
        Ok(out)
    }

    pub fn entry(&self, digest: B256) -> Result<SignatureEntry> {
        Ok(SignatureEntry::ecdsa(self.sign_digest(digest)?))
    }
}
