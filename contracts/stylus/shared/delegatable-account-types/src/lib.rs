#![cfg_attr(not(test), no_std)]
//! Types shared by the delegatable account contract and its off-chain tooling.
//!
//! Everything here is pure: typed-data hashing, the delegation and signature payload
//! encodings, owner sets, the v0.6 user operation hash and the built-in caveat enforcers.

extern crate alloc;

pub mod delegation;
pub mod eip712;
pub mod enforcers;
pub mod owners;
pub mod user_op;

pub use delegation::{
    account_types, decode_signature_entries, encode_signature_entries, Caveat, Delegation,
    MultisigParams, SignatureEntry, SignaturePayload, SignedDelegation, SignerUpdate,
    TypedStruct, DOMAIN_VERSION, ROOT_AUTHORITY,
};
pub use eip712::{Eip712Domain, TypedDataError, TypedValue, Types};
pub use enforcers::{
    allowed_methods_terms, block_number_after_terms, Action, AllowedMethodsEnforcer,
    BlockNumberAfterEnforcer, CaveatDenied, CaveatEnforcer, EnforcerRegistry, EnforcerSet,
    ExecutionContext,
};
pub use owners::{SignerSet, SignerSetError};
pub use user_op::{hash_user_operation, UserOperation};
