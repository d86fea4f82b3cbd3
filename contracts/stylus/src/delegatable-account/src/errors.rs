//! Validation failures and their Solidity error encoding.
//!
//! The pure validation code returns [`ValidationError`]; the contract maps it into
//! [`AccountError`] so every rejection reverts with a typed custom error.

use alloc::vec::Vec;

use alloy_sol_types::sol;
use delegatable_account_types::{SignerSetError, TypedDataError};
use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    stylus_proc::SolidityError,
};

/// Errors during signature, delegation and signer-update validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong length, unknown recovery id, or an undecodable signature payload.
    InvalidSignatureEncoding,
    /// A contract signer rejected the signature through ERC-1271.
    InvalidSignature(Address),
    /// Recovered or claimed signer is not in the required owner set.
    UnknownSigner(Address),
    InsufficientSignatures { required: usize, provided: usize },
    /// Link `index` does not reference the previous link (or the account, for index 0).
    BrokenAuthorityChain(usize),
    CaveatRejected {
        delegation: usize,
        caveat: usize,
        enforcer: Address,
    },
    UnknownEnforcer(Address),
    DelegationGasLimitExceeded { delegation: usize, gas_limit: U256 },
    StaleNonce { expected: U256, provided: U256 },
    InvalidSignerSet(SignerSetError),
    UserOpHashMismatch {
        expected: FixedBytes<32>,
        provided: FixedBytes<32>,
    },
    MalformedCallData,
    MalformedTypedData(TypedDataError),
}

impl From<TypedDataError> for ValidationError {
    fn from(err: TypedDataError) -> Self {
        ValidationError::MalformedTypedData(err)
    }
}

impl From<SignerSetError> for ValidationError {
    fn from(err: SignerSetError) -> Self {
        ValidationError::InvalidSignerSet(err)
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    error InvalidSignatureEncoding();
    #[derive(Debug, PartialEq, Eq)]
    error InvalidSignature(address signer);
    #[derive(Debug, PartialEq, Eq)]
    error UnknownSigner(address signer);
    #[derive(Debug, PartialEq, Eq)]
    error InsufficientSignatures(uint256 required, uint256 provided);
    #[derive(Debug, PartialEq, Eq)]
    error BrokenAuthorityChain(uint256 index);
    #[derive(Debug, PartialEq, Eq)]
    error CaveatRejected(uint256 delegationIndex, uint256 caveatIndex, address enforcer);
    #[derive(Debug, PartialEq, Eq)]
    error UnknownEnforcer(address enforcer);
    #[derive(Debug, PartialEq, Eq)]
    error DelegationGasLimitExceeded(uint256 index, uint256 gasLimit);
    #[derive(Debug, PartialEq, Eq)]
    error StaleNonce(uint256 expected, uint256 provided);
    #[derive(Debug, PartialEq, Eq)]
    error InvalidSignerSet();
    #[derive(Debug, PartialEq, Eq)]
    error UserOpHashMismatch(bytes32 expected, bytes32 provided);
    #[derive(Debug, PartialEq, Eq)]
    error MalformedCallData();
    #[derive(Debug, PartialEq, Eq)]
    error MalformedTypedData();
    #[derive(Debug, PartialEq, Eq)]
    error UnauthorizedMutation(address caller);
    #[derive(Debug, PartialEq, Eq)]
    error NotFromEntryPoint(address caller);
    #[derive(Debug, PartialEq, Eq)]
    error AlreadyInitialized(address account);
    #[derive(Debug, PartialEq, Eq)]
    error NotInitialized(address account);
    #[derive(Debug, PartialEq, Eq)]
    error ExecutionFailed(bytes reason);
}

#[derive(SolidityError, Debug, PartialEq, Eq)]
pub enum AccountError {
    InvalidSignatureEncoding(InvalidSignatureEncoding),
    InvalidSignature(InvalidSignature),
    UnknownSigner(UnknownSigner),
    InsufficientSignatures(InsufficientSignatures),
    BrokenAuthorityChain(BrokenAuthorityChain),
    CaveatRejected(CaveatRejected),
    UnknownEnforcer(UnknownEnforcer),
    DelegationGasLimitExceeded(DelegationGasLimitExceeded),
    StaleNonce(StaleNonce),
    InvalidSignerSet(InvalidSignerSet),
    UserOpHashMismatch(UserOpHashMismatch),
    MalformedCallData(MalformedCallData),
    MalformedTypedData(MalformedTypedData),
    UnauthorizedMutation(UnauthorizedMutation),
    NotFromEntryPoint(NotFromEntryPoint),
    AlreadyInitialized(AlreadyInitialized),
    NotInitialized(NotInitialized),
    ExecutionFailed(ExecutionFailed),
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSignatureEncoding => {
                AccountError::InvalidSignatureEncoding(InvalidSignatureEncoding {})
            }
            ValidationError::InvalidSignature(signer) => {
                AccountError::InvalidSignature(InvalidSignature { signer })
            }
            ValidationError::UnknownSigner(signer) => {
                AccountError::UnknownSigner(UnknownSigner { signer })
            }
            ValidationError::InsufficientSignatures { required, provided } => {
                AccountError::InsufficientSignatures(InsufficientSignatures {
                    required: U256::from(required),
                    provided: U256::from(provided),
                })
            }
            ValidationError::BrokenAuthorityChain(index) => {
                AccountError::BrokenAuthorityChain(BrokenAuthorityChain {
                    index: U256::from(index),
                })
            }
            ValidationError::CaveatRejected {
                delegation,
                caveat,
                enforcer,
            } => AccountError::CaveatRejected(CaveatRejected {
                delegationIndex: U256::from(delegation),
                caveatIndex: U256::from(caveat),
                enforcer,
            }),
            ValidationError::UnknownEnforcer(enforcer) => {
                AccountError::UnknownEnforcer(UnknownEnforcer { enforcer })
            }
            ValidationError::DelegationGasLimitExceeded {
                delegation,
                gas_limit,
            } => AccountError::DelegationGasLimitExceeded(DelegationGasLimitExceeded {
                index: U256::from(delegation),
                gasLimit: gas_limit,
            }),
            ValidationError::StaleNonce { expected, provided } => {
                AccountError::StaleNonce(StaleNonce { expected, provided })
            }
            ValidationError::InvalidSignerSet(_) => AccountError::InvalidSignerSet(InvalidSignerSet {}),
            ValidationError::UserOpHashMismatch { expected, provided } => {
                AccountError::UserOpHashMismatch(UserOpHashMismatch { expected, provided })
            }
            ValidationError::MalformedCallData => AccountError::MalformedCallData(MalformedCallData {}),
            ValidationError::MalformedTypedData(_) => {
                AccountError::MalformedTypedData(MalformedTypedData {})
            }
        }
    }
}

impl AccountError {
    pub(crate) fn execution_failed(reason: Vec<u8>) -> Self {
        AccountError::ExecutionFailed(ExecutionFailed {
            reason: reason.into(),
        })
    }
}
