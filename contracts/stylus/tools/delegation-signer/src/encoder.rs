//! Builders for everything the account verifies: signed delegations, user operation
//! signature payloads and signer-update authorizations.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use anyhow::{anyhow, Result};
use delegatable_account_types::{
    encode_signature_entries, hash_user_operation, Delegation, Eip712Domain, MultisigParams,
    SignaturePayload, SignedDelegation, SignerUpdate, TypedStruct, UserOperation,
    DOMAIN_VERSION,
};

pub use delegatable_account_types::{allowed_methods_terms, block_number_after_terms};

use crate::signer::LocalSigner;

sol! {
    function execute(address target, uint256 value, bytes data) external returns (bytes memory);
    function updateSigners(address[] newOwners, uint256 newThreshold, bytes authorization) external;
}

/// `callData` for a user operation that makes the account call `target`.
pub fn execute_call_data(target: Address, value: U256, data: Bytes) -> Vec<u8> {
    executeCall { target, value, data }.abi_encode()
}

/// `callData` for a user operation that rotates the owner set.
pub fn update_signers_call_data(owners: &[Address], threshold: U256, authorization: Vec<u8>) -> Vec<u8> {
    updateSignersCall {
        newOwners: owners.to_vec(),
        newThreshold: threshold,
        authorization: authorization.into(),
    }
    .abi_encode()
}

/// Domain an account named `name` verifies under.
pub fn account_domain(name: &str, chain_id: u64, account: Address) -> Eip712Domain {
    Eip712Domain::new(name, DOMAIN_VERSION, chain_id, account)
}

/// 4-byte selector of a canonical function signature, e.g. `transfer(address,uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let h = keccak256(signature.as_bytes());
    [h[0], h[1], h[2], h[3]]
}

/// Sign `delegation` on behalf of `grantor` with (a threshold of) its owners.
pub fn sign_delegation(
    domain: &Eip712Domain,
    delegation: Delegation,
    grantor: Address,
    owners: &[&LocalSigner],
) -> Result<SignedDelegation> {
    let digest = delegation
        .signing_hash(domain)
        .map_err(|e| anyhow!("hashing delegation: {e:?}"))?;
    let entries = owners
        .iter()
        .map(|owner| owner.entry(digest))
        .collect::<Result<Vec<_>>>()?;
    Ok(SignedDelegation {
        message: delegation,
        signature: encode_signature_entries(&entries).into(),
        signer: grantor,
    })
}

/// Hash a child delegation must carry as its `authority`.
pub fn delegation_hash(domain: &Eip712Domain, signed: &SignedDelegation) -> Result<B256> {
    signed
        .signing_hash(domain)
        .map_err(|e| anyhow!("hashing signed delegation: {e:?}"))
}

/// Sign `user_op_hash` and bundle the signatures with `delegations`.
pub fn signature_payload(
    user_op_hash: B256,
    signers: &[&LocalSigner],
    delegations: Vec<SignedDelegation>,
) -> Result<SignaturePayload> {
    let signatures = signers
        .iter()
        .map(|signer| signer.entry(user_op_hash))
        .collect::<Result<Vec<_>>>()?;
    Ok(SignaturePayload {
        signatures,
        delegations,
    })
}

/// Fill `op.signature` and return the hash that was signed.
pub fn sign_user_op(
    op: &mut UserOperation,
    entry_point: Address,
    chain_id: u64,
    signers: &[&LocalSigner],
    delegations: Vec<SignedDelegation>,
) -> Result<B256> {
    let hash = hash_user_operation(op, entry_point, chain_id);
    op.signature = signature_payload(hash, signers, delegations)?.encode().into();
    Ok(hash)
}

/// `authorization` argument for `updateSigners(owners, threshold, ..)` at signer nonce `nonce`.
pub fn authorize_signer_update(
    domain: &Eip712Domain,
    owners: &[Address],
    threshold: U256,
    nonce: U256,
    current_owners: &[&LocalSigner],
) -> Result<Vec<u8>> {
    let params = MultisigParams {
        signers: owners.to_vec(),
        threshold,
        nonce,
    };
    let digest = params
        .signing_hash(domain)
        .map_err(|e| anyhow!("hashing signer update: {e:?}"))?;
    let signatures = current_owners
        .iter()
        .map(|owner| owner.entry(digest))
        .collect::<Result<Vec<_>>>()?;
    Ok(SignerUpdate { nonce, signatures }.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use delegatable_account_types::{
        decode_signature_entries, Caveat, SignatureEntry, ROOT_AUTHORITY,
    };

    const HARDHAT_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const HARDHAT_1: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn signers() -> (LocalSigner, LocalSigner) {
        (
            LocalSigner::from_hex(HARDHAT_0).unwrap(),
            LocalSigner::from_hex(HARDHAT_1).unwrap(),
        )
    }

    #[test]
    fn selectors_match_known_values() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("approve(address,uint256)"), [0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn call_data_uses_account_selectors() {
        let call = execute_call_data(Address::repeat_byte(0x70), U256::from(1u64), Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]));
        assert_eq!(call[..4], selector("execute(address,uint256,bytes)"));
        let decoded = executeCall::abi_decode(&call, true).unwrap();
        assert_eq!(decoded.target, Address::repeat_byte(0x70));

        let call = update_signers_call_data(&[Address::repeat_byte(1)], U256::from(1u64), vec![0xde, 0xad]);
        assert_eq!(call[..4], selector("updateSigners(address[],uint256,bytes)"));
    }

    #[test]
    fn signed_delegation_carries_one_entry_per_owner() {
        let (a, b) = signers();
        let account = Address::repeat_byte(0x58);
        let domain = account_domain("Smart Account", 31337, account);
        let delegation = Delegation {
            delegate: Address::repeat_byte(0x59),
            authority: ROOT_AUTHORITY,
            caveats: vec![Caveat {
                enforcer: Address::repeat_byte(0xb1),
                terms: block_number_after_terms(1_000_000).into(),
            }],
            gasLimit: U256::ZERO,
            nonce: U256::ZERO,
        };

        let signed = sign_delegation(&domain, delegation.clone(), account, &[&a, &b]).unwrap();
        assert_eq!(signed.signer, account);
        assert_eq!(signed.message, delegation);

        let entries = decode_signature_entries(&signed.signature).unwrap();
        let digest = delegation.signing_hash(&domain).unwrap();
        assert_eq!(
            entries,
            vec![a.entry(digest).unwrap(), b.entry(digest).unwrap()]
        );
        assert!(entries.iter().all(|e| e.contractAddress == Address::ZERO));

        let hash = delegation_hash(&domain, &signed).unwrap();
        assert_ne!(hash, digest);
    }

    #[test]
    fn signed_user_op_decodes_to_payload() {
        let (a, _) = signers();
        let entry_point = Address::repeat_byte(0xee);
        let mut op = UserOperation {
            sender: Address::repeat_byte(0x58),
            callData: vec![1, 2, 3].into(),
            ..Default::default()
        };

        let hash = sign_user_op(&mut op, entry_point, 31337, &[&a], Vec::new()).unwrap();
        assert_eq!(hash, hash_user_operation(&op, entry_point, 31337));

        let payload = SignaturePayload::decode(&op.signature).unwrap();
        assert!(!payload.is_delegated());
        assert_eq!(payload.signatures, vec![a.entry(hash).unwrap()]);
    }

    #[test]
    fn signer_update_authorization_encodes_nonce() {
        let (a, b) = signers();
        let domain = account_domain("Smart Account", 31337, Address::repeat_byte(0x58));
        let owners = [a.address(), b.address()];

        let auth =
            authorize_signer_update(&domain, &owners, U256::from(2u64), U256::from(4u64), &[&a]).unwrap();
        let update = SignerUpdate::decode(&auth).unwrap();
        assert_eq!(update.nonce, U256::from(4u64));
        assert_eq!(update.signatures.len(), 1);
        let SignatureEntry { contractAddress, .. } = &update.signatures[0];
        assert_eq!(*contractAddress, Address::ZERO);
    }
}
