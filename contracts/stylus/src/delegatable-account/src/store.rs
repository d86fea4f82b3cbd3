//! Owner/threshold state and the only path that rewrites it.

use alloc::vec::Vec;

use delegatable_account_types::{Eip712Domain, MultisigParams, SignerSet, SignerUpdate, TypedStruct};
use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{authority::AuthorityState, errors::ValidationError, signatures::verify_threshold};

/// Persistent owner set, threshold and signer nonce of one account.
pub trait SignerStore {
    fn signer_set(&self) -> Result<SignerSet, ValidationError>;

    fn signer_nonce(&self) -> U256;

    /// Replace owners and threshold and set the nonce, as one write.
    fn commit_signers(&mut self, set: &SignerSet, nonce: U256);
}

/// Digest the current owners sign to install `owners`/`threshold` at `nonce`.
pub fn signer_update_hash(
    domain: &Eip712Domain,
    owners: &[Address],
    threshold: U256,
    nonce: U256,
) -> Result<FixedBytes<32>, ValidationError> {
    let params = MultisigParams {
        signers: owners.to_vec(),
        threshold,
        nonce,
    };
    Ok(params.signing_hash(domain)?)
}

/// Verify `authorization` against the current owners and commit the new set.
///
/// Nothing is written unless every check passes; on success the signer nonce advances by one.
pub fn apply_signer_update<S, A>(
    store: &mut S,
    state: &A,
    domain: &Eip712Domain,
    new_owners: Vec<Address>,
    new_threshold: U256,
    authorization: &[u8],
) -> Result<SignerSet, ValidationError>
where
    S: SignerStore + ?Sized,
    A: AuthorityState + ?Sized,
{
    let update =
        SignerUpdate::decode(authorization).map_err(|_| ValidationError::InvalidSignatureEncoding)?;

    let expected = store.signer_nonce();
    if update.nonce != expected {
        return Err(ValidationError::StaleNonce {
            expected,
            provided: update.nonce,
        });
    }

    let digest = signer_update_hash(domain, &new_owners, new_threshold, expected)?;
    let next = SignerSet::new(new_owners, new_threshold)?;

    let current = store.signer_set()?;
    verify_threshold(state, digest, &update.signatures, &current)?;

    store.commit_signers(&next, expected + U256::from(1u64));
    Ok(next)
}
