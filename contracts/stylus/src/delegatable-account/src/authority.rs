//! Live authorization state the validator reads while checking a chain.

use delegatable_account_types::SignerSet;
use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use crate::errors::ValidationError;

/// Current owner sets and contract-signer verdicts, implemented differently on-chain vs in tests.
pub trait AuthorityState {
    /// Owner set of `account` as of now, never as of signing time.
    fn signer_set(&self, account: Address) -> Result<SignerSet, ValidationError>;

    /// ERC-1271 verdict of `signer` over `digest`.
    fn is_valid_contract_signature(
        &self,
        signer: Address,
        digest: FixedBytes<32>,
        signature: &[u8],
    ) -> bool;
}

impl<T: AuthorityState + ?Sized> AuthorityState for &T {
    fn signer_set(&self, account: Address) -> Result<SignerSet, ValidationError> {
        (**self).signer_set(account)
    }

    fn is_valid_contract_signature(
        &self,
        signer: Address,
        digest: FixedBytes<32>,
        signature: &[u8],
    ) -> bool {
        (**self).is_valid_contract_signature(signer, digest, signature)
    }
}
