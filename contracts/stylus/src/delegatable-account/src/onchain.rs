//! On-chain implementations of the validator's collaborators.
//!
//! Everything here is a `staticcall` with a per-call gas cap; a call that fails or returns
//! garbage never authorizes anything.

use alloc::{boxed::Box, vec::Vec};

use alloy_sol_types::SolCall;
use delegatable_account_types::{
    enforcers::ICaveatEnforcer, Action, CaveatDenied, CaveatEnforcer, EnforcerRegistry,
    ExecutionContext, SignerSet,
};
use stylus_sdk::{
    alloy_primitives::{Address, Bytes, FixedBytes},
    call::RawCall,
};

use crate::{
    authority::AuthorityState,
    constants::ERC1271_MAGIC_VALUE,
    errors::ValidationError,
    interfaces::{IDelegatableAccount, IERC1271},
};

fn staticcall(target: Address, gas_cap: u64, data: &[u8]) -> Option<Vec<u8>> {
    unsafe { RawCall::new_static().gas(gas_cap).call(target, data) }.ok()
}

/// Owner sets and ERC-1271 verdicts read from chain state.
///
/// The executing account's own set comes from its storage snapshot; any other account is
/// asked for `getOwners()`/`threshold()`, and an address that does not answer is treated
/// as an externally-owned single signer.
pub struct OnchainAuthority {
    pub account: Address,
    pub local: SignerSet,
    pub gas_cap: u64,
}

impl OnchainAuthority {
    pub fn new(account: Address, local: SignerSet, gas_cap: u64) -> Self {
        Self {
            account,
            local,
            gas_cap,
        }
    }

    fn remote_signer_set(&self, account: Address) -> Option<Result<SignerSet, ValidationError>> {
        let out = staticcall(account, self.gas_cap, &IDelegatableAccount::getOwnersCall {}.abi_encode())?;
        let owners = IDelegatableAccount::getOwnersCall::abi_decode_returns(&out, true)
            .ok()?
            .owners;
        let out = staticcall(account, self.gas_cap, &IDelegatableAccount::thresholdCall {}.abi_encode())?;
        let threshold = IDelegatableAccount::thresholdCall::abi_decode_returns(&out, true)
            .ok()?
            .required;
        Some(SignerSet::new(owners, threshold).map_err(ValidationError::from))
    }
}

impl AuthorityState for OnchainAuthority {
    fn signer_set(&self, account: Address) -> Result<SignerSet, ValidationError> {
        if account == self.account {
            return Ok(self.local.clone());
        }
        self.remote_signer_set(account)
            .unwrap_or_else(|| Ok(SignerSet::single(account)))
    }

    fn is_valid_contract_signature(
        &self,
        signer: Address,
        digest: FixedBytes<32>,
        signature: &[u8],
    ) -> bool {
        let call = IERC1271::isValidSignatureCall {
            hash: digest,
            signature: Bytes::copy_from_slice(signature),
        };
        staticcall(signer, self.gas_cap, &call.abi_encode())
            .and_then(|out| IERC1271::isValidSignatureCall::abi_decode_returns(&out, true).ok())
            .is_some_and(|ret| ret.magicValue == ERC1271_MAGIC_VALUE)
    }
}

/// Enforcer contract reached through `ICaveatEnforcer.enforceCaveat`.
pub struct ExternalEnforcer {
    pub address: Address,
    pub gas_cap: u64,
}

impl CaveatEnforcer for ExternalEnforcer {
    fn enforce_caveat(
        &self,
        terms: &[u8],
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<(), CaveatDenied> {
        let call = ICaveatEnforcer::enforceCaveatCall {
            terms: Bytes::copy_from_slice(terms),
            action: action.clone(),
            context: context.to_abi(),
        };
        let out = staticcall(self.address, self.gas_cap, &call.abi_encode())
            .ok_or(CaveatDenied::CallFailed)?;
        let allowed = ICaveatEnforcer::enforceCaveatCall::abi_decode_returns(&out, true)
            .map_err(|_| CaveatDenied::MalformedReturn)?
            ._0;
        if allowed {
            Ok(())
        } else {
            Err(CaveatDenied::Rejected)
        }
    }
}

/// Resolves every non-zero caveat address to its enforcer contract.
pub struct OnchainEnforcers {
    pub gas_cap: u64,
}

impl EnforcerRegistry for OnchainEnforcers {
    fn resolve(&self, enforcer: Address) -> Option<Box<dyn CaveatEnforcer + '_>> {
        if enforcer == Address::ZERO {
            return None;
        }
        Some(Box::new(ExternalEnforcer {
            address: enforcer,
            gas_cap: self.gas_cap,
        }))
    }
}
