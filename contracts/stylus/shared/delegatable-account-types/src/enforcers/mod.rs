//! Caveat enforcers.
//!
//! A caveat names an enforcer by address and carries opaque terms only that enforcer
//! understands. Validation resolves the address through an [`EnforcerRegistry`] and calls
//! through the [`CaveatEnforcer`] trait object; it never matches on concrete enforcer kinds.

use alloc::{boxed::Box, collections::BTreeMap};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::sol;

pub mod allowed_methods;
pub mod block_number;

pub use allowed_methods::{allowed_methods_terms, AllowedMethodsEnforcer};
pub use block_number::{block_number_after_terms, BlockNumberAfterEnforcer};

sol! {
    /// Call the account is being asked to make.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct Action {
        address to;
        uint256 value;
        bytes data;
    }

    /// ABI form of [`ExecutionContext`] passed to enforcer contracts.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct EnforcementContext {
        address account;
        uint256 blockNumber;
        uint256 timestamp;
        uint256 callGasLimit;
        bytes32 delegationHash;
    }

    interface ICaveatEnforcer {
        function enforceCaveat(bytes terms, Action action, EnforcementContext context)
            external
            view
            returns (bool);
    }
}

/// Execution facts an enforcer may inspect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Account that will perform the call.
    pub account: Address,
    pub block_number: u64,
    pub timestamp: u64,
    pub call_gas_limit: U256,
    /// Hash of the signed delegation whose caveat is being enforced.
    pub delegation_hash: B256,
}

impl ExecutionContext {
    pub fn for_delegation(&self, delegation_hash: B256) -> Self {
        Self {
            delegation_hash,
            ..*self
        }
    }

    pub fn to_abi(&self) -> EnforcementContext {
        EnforcementContext {
            account: self.account,
            blockNumber: U256::from(self.block_number),
            timestamp: U256::from(self.timestamp),
            callGasLimit: self.call_gas_limit,
            delegationHash: self.delegation_hash,
        }
    }
}

/// Why an enforcer refused a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaveatDenied {
    Rejected,
    MalformedTerms,
    /// The enforcer contract reverted or could not be called.
    CallFailed,
    MalformedReturn,
}

pub trait CaveatEnforcer {
    fn enforce_caveat(
        &self,
        terms: &[u8],
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<(), CaveatDenied>;
}

impl<T: CaveatEnforcer + ?Sized> CaveatEnforcer for &T {
    fn enforce_caveat(
        &self,
        terms: &[u8],
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<(), CaveatDenied> {
        (**self).enforce_caveat(terms, action, context)
    }
}

/// Maps an enforcer address to something that can enforce it.
pub trait EnforcerRegistry {
    fn resolve(&self, enforcer: Address) -> Option<Box<dyn CaveatEnforcer + '_>>;
}

/// In-process registry, used off-chain and in tests.
#[derive(Default)]
pub struct EnforcerSet {
    enforcers: BTreeMap<Address, Box<dyn CaveatEnforcer>>,
}

impl EnforcerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: Address, enforcer: impl CaveatEnforcer + 'static) -> Self {
        self.register(address, enforcer);
        self
    }

    pub fn register(&mut self, address: Address, enforcer: impl CaveatEnforcer + 'static) {
        self.enforcers.insert(address, Box::new(enforcer));
    }
}

impl EnforcerRegistry for EnforcerSet {
    fn resolve(&self, enforcer: Address) -> Option<Box<dyn CaveatEnforcer + '_>> {
        self.enforcers
            .get(&enforcer)
            .map(|e| Box::new(e.as_ref()) as Box<dyn CaveatEnforcer + '_>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyAll;

    impl CaveatEnforcer for DenyAll {
        fn enforce_caveat(&self, _: &[u8], _: &Action, _: &ExecutionContext) -> Result<(), CaveatDenied> {
            Err(CaveatDenied::Rejected)
        }
    }

    #[test]
    fn registry_dispatches_by_address() {
        let registry = EnforcerSet::new()
            .with(Address::repeat_byte(1), BlockNumberAfterEnforcer)
            .with(Address::repeat_byte(2), DenyAll);
        let context = ExecutionContext {
            block_number: 10,
            ..Default::default()
        };
        let action = Action::default();

        let allow = registry.resolve(Address::repeat_byte(1)).unwrap();
        assert_eq!(allow.enforce_caveat(&block_number_after_terms(5), &action, &context), Ok(()));

        let deny = registry.resolve(Address::repeat_byte(2)).unwrap();
        assert_eq!(
            deny.enforce_caveat(&[], &action, &context),
            Err(CaveatDenied::Rejected)
        );

        assert!(registry.resolve(Address::repeat_byte(3)).is_none());
    }

    #[test]
    fn context_abi_carries_delegation_hash() {
        let context = ExecutionContext {
            account: Address::repeat_byte(9),
            block_number: 42,
            timestamp: 1_700_000_000,
            call_gas_limit: U256::from(300_000u64),
            delegation_hash: B256::ZERO,
        }
        .for_delegation(B256::repeat_byte(0xab));

        let abi = context.to_abi();
        assert_eq!(abi.account, Address::repeat_byte(9));
        assert_eq!(abi.blockNumber, U256::from(42u64));
        assert_eq!(abi.callGasLimit, U256::from(300_000u64));
        assert_eq!(abi.delegationHash, B256::repeat_byte(0xab));
    }
}
