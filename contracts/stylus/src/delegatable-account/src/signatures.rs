//! k-of-n signature checks.

use alloc::vec::Vec;

use delegatable_account_types::{SignatureEntry, SignerSet};
use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use crate::{authority::AuthorityState, errors::ValidationError, utils::crypto::recover_signer};

/// Check that `entries` carry at least `set.threshold()` distinct owner signatures over `digest`.
///
/// Every entry must come from an owner; a repeated signer is counted once.
pub fn verify_threshold<A: AuthorityState + ?Sized>(
    state: &A,
    digest: FixedBytes<32>,
    entries: &[SignatureEntry],
    set: &SignerSet,
) -> Result<(), ValidationError> {
    let mut signers: Vec<Address> = Vec::with_capacity(entries.len());

    for entry in entries {
        let signer = if entry.contractAddress == Address::ZERO {
            recover_signer(digest, &entry.signature)?
        } else {
            entry.contractAddress
        };
        if !set.is_owner(signer) {
            return Err(ValidationError::UnknownSigner(signer));
        }
        if entry.contractAddress != Address::ZERO
            && !state.is_valid_contract_signature(signer, digest, &entry.signature)
        {
            return Err(ValidationError::InvalidSignature(signer));
        }
        if !signers.contains(&signer) {
            signers.push(signer);
        }
    }

    if signers.len() < set.threshold() {
        return Err(ValidationError::InsufficientSignatures {
            required: set.threshold(),
            provided: signers.len(),
        });
    }
    Ok(())
}
