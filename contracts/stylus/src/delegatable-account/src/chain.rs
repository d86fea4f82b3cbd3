//! Delegation chain validation.
//!
//! Chains are ordered outermost-first. Link 0 is granted by the executing account with the
//! root authority; link `i > 0` is granted by the previous link's delegate and its `authority`
//! is the signing hash of the previous `SignedDelegation`. The chain is a fold over that list:
//! there is no stored graph, each link is re-hashed and compared.

use alloc::vec::Vec;

use delegatable_account_types::{
    decode_signature_entries, Action, EnforcerRegistry, Eip712Domain, ExecutionContext,
    SignedDelegation, TypedStruct, ROOT_AUTHORITY,
};
use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use crate::{authority::AuthorityState, errors::ValidationError, signatures::verify_threshold};

pub struct ChainValidator<'a, S: ?Sized, R: ?Sized> {
    pub domain: &'a Eip712Domain,
    /// Account the chain is redeemed against.
    pub account: Address,
    pub state: &'a S,
    pub enforcers: &'a R,
}

impl<S, R> ChainValidator<'_, S, R>
where
    S: AuthorityState + ?Sized,
    R: EnforcerRegistry + ?Sized,
{
    /// Validate `chain` for `action` and return the innermost delegate, whose owners must
    /// sign the call itself.
    ///
    /// Links are checked in three passes so a broken link is reported regardless of whether
    /// its signatures or caveats would pass.
    pub fn validate(
        &self,
        chain: &[SignedDelegation],
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<Address, ValidationError> {
        let hashes = self.link_hashes(chain)?;

        for link in chain {
            let digest = link.message.signing_hash(self.domain)?;
            let entries = decode_signature_entries(&link.signature)
                .map_err(|_| ValidationError::InvalidSignatureEncoding)?;
            let set = self.state.signer_set(link.signer)?;
            verify_threshold(self.state, digest, &entries, &set)?;
        }

        for (index, (link, hash)) in chain.iter().zip(&hashes).enumerate() {
            self.enforce_link(index, link, *hash, action, context)?;
        }

        chain
            .last()
            .map(|link| link.message.delegate)
            .ok_or(ValidationError::BrokenAuthorityChain(0))
    }

    /// Signing hash of every link, checking that each one points at its parent.
    fn link_hashes(&self, chain: &[SignedDelegation]) -> Result<Vec<FixedBytes<32>>, ValidationError> {
        let mut hashes: Vec<FixedBytes<32>> = Vec::with_capacity(chain.len());

        for (index, link) in chain.iter().enumerate() {
            let (authority, grantor) = match index {
                0 => (ROOT_AUTHORITY, self.account),
                _ => (hashes[index - 1], chain[index - 1].message.delegate),
            };
            if link.message.authority != authority || link.signer != grantor {
                return Err(ValidationError::BrokenAuthorityChain(index));
            }
            hashes.push(link.signing_hash(self.domain)?);
        }
        Ok(hashes)
    }

    fn enforce_link(
        &self,
        index: usize,
        link: &SignedDelegation,
        hash: FixedBytes<32>,
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<(), ValidationError> {
        let gas_limit = link.message.gasLimit;
        if !gas_limit.is_zero() && context.call_gas_limit > gas_limit {
            return Err(ValidationError::DelegationGasLimitExceeded {
                delegation: index,
                gas_limit,
            });
        }

        let context = context.for_delegation(hash);
        for (caveat_index, caveat) in link.message.caveats.iter().enumerate() {
            let enforcer = self
                .enforcers
                .resolve(caveat.enforcer)
                .ok_or(ValidationError::UnknownEnforcer(caveat.enforcer))?;
            enforcer
                .enforce_caveat(&caveat.terms, action, &context)
                .map_err(|_| ValidationError::CaveatRejected {
                    delegation: index,
                    caveat: caveat_index,
                    enforcer: caveat.enforcer,
                })?;
        }
        Ok(())
    }
}
