//! Delegation wire types, the signature payload carried in `userOp.signature`, and the
//! typed-data schema both are signed under.

use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::{sol, SolValue};

use crate::eip712::{Eip712Domain, TypedDataError, TypedValue, Types};

/// `authority` of a first-order delegation granted by the account itself.
pub const ROOT_AUTHORITY: B256 = B256::ZERO;

/// Domain version every account signs under.
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// Pluggable restriction: `enforcer` interprets `terms`.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct Caveat {
        address enforcer;
        bytes terms;
    }

    /// Capability grant from the signer account to `delegate`.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct Delegation {
        address delegate;
        bytes32 authority;
        Caveat[] caveats;
        uint256 gasLimit;
        uint256 nonce;
    }

    /// `signature` is an ABI-encoded `SignatureEntry[]` over the delegation hash.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SignedDelegation {
        Delegation message;
        bytes signature;
        address signer;
    }

    /// Owner set replacement signed by the current owners.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct MultisigParams {
        address[] signers;
        uint256 threshold;
        uint256 nonce;
    }

    /// Zero `contractAddress`: 65-byte ECDSA `r||s||v`. Otherwise an ERC-1271 contract signer.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SignatureEntry {
        address contractAddress;
        bytes signature;
    }

    /// Decoded form of `userOp.signature`. No delegations means the account's owners sign directly.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SignaturePayload {
        SignatureEntry[] signatures;
        SignedDelegation[] delegations;
    }

    /// `authorization` argument of `updateSigners`.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SignerUpdate {
        uint256 nonce;
        SignatureEntry[] signatures;
    }
}

/// Struct definitions shared by every account domain.
pub fn account_types() -> Types {
    Types::new()
        .with("Caveat", &[("enforcer", "address"), ("terms", "bytes")])
        .with(
            "Delegation",
            &[
                ("delegate", "address"),
                ("authority", "bytes32"),
                ("caveats", "Caveat[]"),
                ("gasLimit", "uint256"),
                ("nonce", "uint256"),
            ],
        )
        .with(
            "SignedDelegation",
            &[
                ("message", "Delegation"),
                ("signature", "bytes"),
                ("signer", "address"),
            ],
        )
        .with(
            "MultisigParams",
            &[
                ("signers", "address[]"),
                ("threshold", "uint256"),
                ("nonce", "uint256"),
            ],
        )
}

/// A message type described by [`account_types`].
pub trait TypedStruct {
    const TYPE_NAME: &'static str;

    fn typed_value(&self) -> TypedValue;

    fn struct_hash(&self) -> Result<B256, TypedDataError> {
        account_types().hash_struct(Self::TYPE_NAME, &self.typed_value())
    }

    fn signing_hash(&self, domain: &Eip712Domain) -> Result<B256, TypedDataError> {
        account_types().signing_hash(domain, Self::TYPE_NAME, &self.typed_value())
    }
}

impl TypedStruct for Caveat {
    const TYPE_NAME: &'static str = "Caveat";

    fn typed_value(&self) -> TypedValue {
        TypedValue::Struct(alloc::vec![
            TypedValue::Address(self.enforcer),
            TypedValue::Bytes(self.terms.to_vec()),
        ])
    }
}

impl TypedStruct for Delegation {
    const TYPE_NAME: &'static str = "Delegation";

    fn typed_value(&self) -> TypedValue {
        TypedValue::Struct(alloc::vec![
            TypedValue::Address(self.delegate),
            TypedValue::from(self.authority),
            TypedValue::Array(self.caveats.iter().map(Caveat::typed_value).collect()),
            TypedValue::Uint(self.gasLimit),
            TypedValue::Uint(self.nonce),
        ])
    }
}

impl TypedStruct for SignedDelegation {
    const TYPE_NAME: &'static str = "SignedDelegation";

    fn typed_value(&self) -> TypedValue {
        TypedValue::Struct(alloc::vec![
            self.message.typed_value(),
            TypedValue::Bytes(self.signature.to_vec()),
            TypedValue::Address(self.signer),
        ])
    }
}

impl TypedStruct for MultisigParams {
    const TYPE_NAME: &'static str = "MultisigParams";

    fn typed_value(&self) -> TypedValue {
        TypedValue::Struct(alloc::vec![
            TypedValue::Array(self.signers.iter().copied().map(TypedValue::Address).collect()),
            TypedValue::Uint(self.threshold),
            TypedValue::Uint(self.nonce),
        ])
    }
}

impl SignatureEntry {
    /// An externally-owned signer's `r||s||v` signature.
    pub fn ecdsa(signature: impl Into<Bytes>) -> Self {
        Self {
            contractAddress: Address::ZERO,
            signature: signature.into(),
        }
    }

    /// A signature checked by `signer` through ERC-1271.
    pub fn contract(signer: Address, signature: impl Into<Bytes>) -> Self {
        Self {
            contractAddress: signer,
            signature: signature.into(),
        }
    }
}

impl SignaturePayload {
    pub fn is_delegated(&self) -> bool {
        !self.delegations.is_empty()
    }

    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, alloy_sol_types::Error> {
        <Self as SolValue>::abi_decode(bytes, true)
    }
}

/// Encoding used for `SignedDelegation.signature` and `isValidSignature` payloads.
pub fn encode_signature_entries(entries: &[SignatureEntry]) -> Vec<u8> {
    entries.to_vec().abi_encode()
}

pub fn decode_signature_entries(bytes: &[u8]) -> Result<Vec<SignatureEntry>, alloy_sol_types::Error> {
    <Vec<SignatureEntry> as SolValue>::abi_decode(bytes, true)
}

impl SignerUpdate {
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, alloy_sol_types::Error> {
        <Self as SolValue>::abi_decode(bytes, true)
    }
}
