//! Stylus ERC-4337 account: storage, entry points and events.
//!
//! The EntryPoint calls `validateUserOp` and then the operation's `callData` on this
//! contract. Ownership changes are an ordinary user operation whose `callData` is
//! `updateSigners(..)`; they additionally carry their own authorization from the current owners.

use alloc::{string::String, vec::Vec};

use alloy_sol_types::{sol, SolCall};
use delegatable_account_types::{
    decode_signature_entries, Eip712Domain, ExecutionContext, SignatureEntry, SignaturePayload,
    SignedDelegation, SignerSet, UserOperation, DOMAIN_VERSION,
};
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{aliases::U192, Address, FixedBytes, U256},
    call::RawCall,
    prelude::*,
    stylus_core::log,
};

use crate::{
    authorization::{AuthorizationMode, Authorizer},
    constants::{ERC1271_INVALID, ERC1271_MAGIC_VALUE, SIG_VALIDATION_SUCCESS, STATIC_CALL_GAS},
    errors::{
        AccountError, AlreadyInitialized, NotFromEntryPoint, NotInitialized, UnauthorizedMutation,
        ValidationError,
    },
    interfaces::IEntryPoint,
    onchain::{OnchainAuthority, OnchainEnforcers},
    signatures::verify_threshold,
    store::{apply_signer_update, signer_update_hash, SignerStore},
};

/// v0.6 `UserOperation` as an ABI tuple:
/// (sender, nonce, initCode, callData, callGasLimit, verificationGasLimit, preVerificationGas,
/// maxFeePerGas, maxPriorityFeePerGas, paymasterAndData, signature)
pub type UserOperationTuple = (
    Address,
    U256,
    Bytes,
    Bytes,
    U256,
    U256,
    U256,
    U256,
    U256,
    Bytes,
    Bytes,
);

/// `SignatureEntry` as `(contractAddress, signature)`.
pub type SignatureEntryTuple = (Address, Bytes);

/// `SignedDelegation` as `((delegate, authority, caveats[(enforcer, terms)], gasLimit, nonce), signature, signer)`.
pub type SignedDelegationTuple = (
    (Address, FixedBytes<32>, Vec<(Address, Bytes)>, U256, U256),
    Bytes,
    Address,
);

sol! {
    event Initialized(address indexed entryPoint, address[] owners, uint256 threshold);
    event SignersUpdated(address[] owners, uint256 threshold, uint256 nonce);
    event UserOperationAuthorized(bytes32 indexed userOpHash, address indexed signer, bool delegated);
    event Executed(address indexed target, uint256 value, bytes data);
}

sol_storage! {
    #[entrypoint]
    pub struct DelegatableAccount {
        bool initialized;
        address entry_point;
        /// EIP-712 domain name.
        string name;

        /// Owners in insertion order; `owner_flags` mirrors membership.
        address[] owners;
        mapping(address => bool) owner_flags;
        uint256 signer_threshold;

        /// Consumed by every `updateSigners`.
        uint256 signer_nonce;
    }
}

#[public]
impl DelegatableAccount {
    /// Configuration fixed at deployment: EntryPoint, initial owners/threshold and the domain
    /// name. Runs inside the deployment transaction, so no other caller can claim the account.
    #[constructor]
    pub fn constructor(
        &mut self,
        entry_point: Address,
        owners: Vec<Address>,
        threshold: U256,
        name: String,
    ) -> Result<(), AccountError> {
        let account = self.vm().contract_address();
        if self.initialized.get() {
            return Err(AccountError::AlreadyInitialized(AlreadyInitialized { account }));
        }
        let set = SignerSet::new(owners, threshold).map_err(ValidationError::from)?;

        self.initialized.set(true);
        self.entry_point.set(entry_point);
        self.name.set_str(&name);
        self.commit_signers(&set, U256::ZERO);

        log(
            self.vm(),
            Initialized {
                entryPoint: entry_point,
                owners: set.owners().to_vec(),
                threshold: U256::from(set.threshold()),
            },
        );
        Ok(())
    }

    /// ERC-4337 `IAccount.validateUserOp` (v0.6).
    ///
    /// Reverts with the validation error instead of returning a failure code; returns 0 when
    /// the operation is authorized.
    pub fn validate_user_op(
        &mut self,
        user_op: UserOperationTuple,
        user_op_hash: FixedBytes<32>,
        missing_account_funds: U256,
    ) -> Result<U256, AccountError> {
        let entry_point = self.require_entry_point()?;
        let account = self.vm().contract_address();
        let op = user_operation(user_op);

        let state = OnchainAuthority::new(account, self.signer_set()?, STATIC_CALL_GAS);
        let enforcers = OnchainEnforcers {
            gas_cap: STATIC_CALL_GAS,
        };
        let authorizer = Authorizer {
            domain: self.domain(),
            account,
            state: &state,
            enforcers: &enforcers,
        };
        let context = ExecutionContext {
            account,
            block_number: self.vm().block_number(),
            timestamp: self.vm().block_timestamp(),
            ..Default::default()
        };
        let mode = authorizer.authorize_user_operation(
            &op,
            user_op_hash,
            entry_point,
            self.vm().chain_id(),
            &context,
        )?;

        let (signer, delegated) = match mode {
            AuthorizationMode::Direct => (account, false),
            AuthorizationMode::Delegated { delegate } => (delegate, true),
        };
        log(
            self.vm(),
            UserOperationAuthorized {
                userOpHash: user_op_hash,
                signer,
                delegated,
            },
        );

        if !missing_account_funds.is_zero() {
            // The EntryPoint rejects the operation itself if the prefund falls short.
            let _ = unsafe { RawCall::new_with_value(missing_account_funds).call(entry_point, &[]) };
        }
        Ok(SIG_VALIDATION_SUCCESS)
    }

    /// Perform the call of an authorized user operation.
    pub fn execute(
        &mut self,
        target: Address,
        value: U256,
        data: Bytes,
    ) -> Result<Bytes, AccountError> {
        self.require_entry_point()?;
        let out = unsafe { RawCall::new_with_value(value).call(target, data.as_slice()) }
            .map_err(AccountError::execution_failed)?;
        log(
            self.vm(),
            Executed {
                target,
                value,
                data: data.0.into(),
            },
        );
        Ok(Bytes(out))
    }

    /// Replace owners and threshold.
    ///
    /// Reachable only from the EntryPoint (as the call of a validated user operation) or the
    /// account itself, and `authorization` must carry the current threshold of owner
    /// signatures over `signerUpdateHash(newOwners, newThreshold, signerNonce)`.
    pub fn update_signers(
        &mut self,
        new_owners: Vec<Address>,
        new_threshold: U256,
        authorization: Bytes,
    ) -> Result<(), AccountError> {
        self.require_initialized()?;
        let caller = self.vm().msg_sender();
        let account = self.vm().contract_address();
        if caller != self.entry_point.get() && caller != account {
            return Err(AccountError::UnauthorizedMutation(UnauthorizedMutation { caller }));
        }

        let domain = self.domain();
        let state = OnchainAuthority::new(account, self.signer_set()?, STATIC_CALL_GAS);
        let next = apply_signer_update(
            self,
            &state,
            &domain,
            new_owners,
            new_threshold,
            authorization.as_slice(),
        )?;

        log(
            self.vm(),
            SignersUpdated {
                owners: next.owners().to_vec(),
                threshold: U256::from(next.threshold()),
                nonce: self.signer_nonce.get(),
            },
        );
        Ok(())
    }

    pub fn is_owner(&self, address: Address) -> bool {
        self.owner_flags.get(address)
    }

    pub fn get_owners(&self) -> Vec<Address> {
        self.stored_owners()
    }

    pub fn threshold(&self) -> U256 {
        self.signer_threshold.get()
    }

    pub fn signer_nonce(&self) -> U256 {
        self.signer_nonce.get()
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point.get()
    }

    /// EntryPoint-managed user operation nonce (key 0).
    pub fn get_nonce(&self) -> Result<U256, AccountError> {
        let call = IEntryPoint::getNonceCall {
            sender: self.vm().contract_address(),
            key: U192::ZERO,
        };
        let out = unsafe {
            RawCall::new_static()
                .gas(STATIC_CALL_GAS)
                .call(self.entry_point.get(), &call.abi_encode())
        }
        .map_err(AccountError::execution_failed)?;
        IEntryPoint::getNonceCall::abi_decode_returns(&out, true)
            .map(|ret| ret.nonce)
            .map_err(|_| AccountError::execution_failed(out))
    }

    pub fn domain_separator(&self) -> FixedBytes<32> {
        self.domain().separator()
    }

    /// Digest owners sign to authorize `updateSigners(owners, threshold, ..)` at `nonce`.
    pub fn signer_update_hash(
        &self,
        owners: Vec<Address>,
        threshold: U256,
        nonce: U256,
    ) -> Result<FixedBytes<32>, AccountError> {
        Ok(signer_update_hash(&self.domain(), &owners, threshold, nonce)?)
    }

    /// ERC-1271: `signature` is an ABI-encoded `SignatureEntry[]` meeting the owner threshold.
    pub fn is_valid_signature(&self, hash: FixedBytes<32>, signature: Bytes) -> FixedBytes<4> {
        let Ok(entries) = decode_signature_entries(signature.as_slice()) else {
            return ERC1271_INVALID;
        };
        let Ok(set) = self.signer_set() else {
            return ERC1271_INVALID;
        };
        let state = OnchainAuthority::new(self.vm().contract_address(), set.clone(), STATIC_CALL_GAS);
        match verify_threshold(&state, hash, &entries, &set) {
            Ok(()) => ERC1271_MAGIC_VALUE,
            Err(_) => ERC1271_INVALID,
        }
    }

    /// Decode a `userOp.signature` payload into its signature entries and delegation chain.
    pub fn decode_signature(
        &self,
        signature: Bytes,
    ) -> Result<(Vec<SignatureEntryTuple>, Vec<SignedDelegationTuple>), AccountError> {
        let payload = SignaturePayload::decode(signature.as_slice())
            .map_err(|_| ValidationError::InvalidSignatureEncoding)?;
        Ok((
            payload.signatures.iter().map(entry_tuple).collect(),
            payload.delegations.iter().map(delegation_tuple).collect(),
        ))
    }

    #[receive]
    #[payable]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        Ok(())
    }
}

impl DelegatableAccount {
    fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            &self.name.get_string(),
            DOMAIN_VERSION,
            self.vm().chain_id(),
            self.vm().contract_address(),
        )
    }

    fn stored_owners(&self) -> Vec<Address> {
        (0..self.owners.len())
            .filter_map(|i| self.owners.get(i))
            .collect()
    }

    fn require_initialized(&self) -> Result<(), AccountError> {
        if !self.initialized.get() {
            return Err(AccountError::NotInitialized(NotInitialized {
                account: self.vm().contract_address(),
            }));
        }
        Ok(())
    }

    fn require_entry_point(&self) -> Result<Address, AccountError> {
        self.require_initialized()?;
        let caller = self.vm().msg_sender();
        let entry_point = self.entry_point.get();
        if caller != entry_point {
            return Err(AccountError::NotFromEntryPoint(NotFromEntryPoint { caller }));
        }
        Ok(entry_point)
    }
}

impl SignerStore for DelegatableAccount {
    fn signer_set(&self) -> Result<SignerSet, ValidationError> {
        Ok(SignerSet::new(self.stored_owners(), self.signer_threshold.get())?)
    }

    fn signer_nonce(&self) -> U256 {
        self.signer_nonce.get()
    }

    fn commit_signers(&mut self, set: &SignerSet, nonce: U256) {
        while let Some(old) = self.owners.pop() {
            self.owner_flags.insert(old, false);
        }
        for owner in set.owners() {
            self.owners.push(*owner);
            self.owner_flags.insert(*owner, true);
        }
        self.signer_threshold.set(U256::from(set.threshold()));
        self.signer_nonce.set(nonce);
    }
}

fn user_operation(op: UserOperationTuple) -> UserOperation {
    let (
        sender,
        nonce,
        init_code,
        call_data,
        call_gas_limit,
        verification_gas_limit,
        pre_verification_gas,
        max_fee_per_gas,
        max_priority_fee_per_gas,
        paymaster_and_data,
        signature,
    ) = op;
    UserOperation {
        sender,
        nonce,
        initCode: init_code.0.into(),
        callData: call_data.0.into(),
        callGasLimit: call_gas_limit,
        verificationGasLimit: verification_gas_limit,
        preVerificationGas: pre_verification_gas,
        maxFeePerGas: max_fee_per_gas,
        maxPriorityFeePerGas: max_priority_fee_per_gas,
        paymasterAndData: paymaster_and_data.0.into(),
        signature: signature.0.into(),
    }
}

fn entry_tuple(entry: &SignatureEntry) -> SignatureEntryTuple {
    (entry.contractAddress, Bytes(entry.signature.to_vec()))
}

fn delegation_tuple(link: &SignedDelegation) -> SignedDelegationTuple {
    let message = &link.message;
    (
        (
            message.delegate,
            message.authority,
            message
                .caveats
                .iter()
                .map(|caveat| (caveat.enforcer, Bytes(caveat.terms.to_vec())))
                .collect(),
            message.gasLimit,
            message.nonce,
        ),
        Bytes(link.signature.to_vec()),
        link.signer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::{
            InsufficientSignatures, InvalidSignatureEncoding, StaleNonce, UnknownSigner,
            UserOpHashMismatch,
        },
        testing::{domain, ecdsa_entry, key, sign, CHAIN_ID},
    };
    use delegatable_account_types::{
        encode_signature_entries, hash_user_operation, Caveat, Delegation, SignerUpdate,
    };
    use k256::ecdsa::SigningKey;
    use stylus_sdk::testing::*;

    const ACCOUNT: Address = Address::repeat_byte(0x58);
    const ENTRY_POINT: Address = Address::repeat_byte(0xee);
    const STRANGER: Address = Address::repeat_byte(0x99);

    struct Fixture {
        vm: TestVM,
        account: DelegatableAccount,
        keys: Vec<(SigningKey, Address)>,
    }

    /// Account with owners {a, b, c} and threshold 2, called by the EntryPoint.
    fn deployed() -> Fixture {
        let vm = TestVM::default();
        vm.set_contract_address(ACCOUNT);
        vm.set_chain_id(CHAIN_ID);
        vm.set_block_number(1_000);
        let mut account = DelegatableAccount::from(&vm);
        let keys = alloc::vec![key(0xa), key(0xb), key(0xc)];

        let owners = keys.iter().map(|(_, address)| *address).collect();
        assert!(account
            .constructor(ENTRY_POINT, owners, U256::from(2u64), String::from("Smart Account"))
            .is_ok());
        vm.set_sender(ENTRY_POINT);
        Fixture { vm, account, keys }
    }

    fn user_op() -> UserOperation {
        UserOperation {
            sender: ACCOUNT,
            nonce: U256::from(1u64),
            callData: alloc::vec![0xde, 0xad, 0xbe, 0xef].into(),
            callGasLimit: U256::from(100_000u64),
            verificationGasLimit: U256::from(300_000u64),
            ..Default::default()
        }
    }

    fn tuple(op: &UserOperation) -> UserOperationTuple {
        (
            op.sender,
            op.nonce,
            Bytes(op.initCode.to_vec()),
            Bytes(op.callData.to_vec()),
            op.callGasLimit,
            op.verificationGasLimit,
            op.preVerificationGas,
            op.maxFeePerGas,
            op.maxPriorityFeePerGas,
            Bytes(op.paymasterAndData.to_vec()),
            Bytes(op.signature.to_vec()),
        )
    }

    fn signed_op(keys: &[&SigningKey]) -> (UserOperation, FixedBytes<32>) {
        let mut op = user_op();
        let hash = hash_user_operation(&op, ENTRY_POINT, CHAIN_ID);
        op.signature = SignaturePayload {
            signatures: keys.iter().map(|k| ecdsa_entry(k, hash)).collect(),
            delegations: Vec::new(),
        }
        .encode()
        .into();
        (op, hash)
    }

    fn update_authorization(
        keys: &[&SigningKey],
        owners: &[Address],
        threshold: u64,
        nonce: u64,
    ) -> Bytes {
        let digest = signer_update_hash(
            &domain(ACCOUNT),
            owners,
            U256::from(threshold),
            U256::from(nonce),
        )
        .unwrap();
        Bytes(
            SignerUpdate {
                nonce: U256::from(nonce),
                signatures: keys.iter().map(|k| ecdsa_entry(k, digest)).collect(),
            }
            .encode(),
        )
    }

    #[test]
    fn constructor_stores_owner_set_once() {
        let Fixture { keys, mut account, .. } = deployed();
        let owners: Vec<Address> = keys.iter().map(|(_, a)| *a).collect();

        assert_eq!(account.get_owners(), owners);
        assert_eq!(account.threshold(), U256::from(2u64));
        assert_eq!(account.signer_nonce(), U256::ZERO);
        assert_eq!(account.entry_point(), ENTRY_POINT);
        assert!(account.is_owner(owners[1]));
        assert!(!account.is_owner(STRANGER));
        assert_eq!(account.domain_separator(), domain(ACCOUNT).separator());

        assert_eq!(
            account.constructor(ENTRY_POINT, owners, U256::from(1u64), String::new()),
            Err(AccountError::AlreadyInitialized(AlreadyInitialized { account: ACCOUNT }))
        );
    }

    #[test]
    fn constructor_rejects_invalid_sets() {
        let vm = TestVM::default();
        let mut account = DelegatableAccount::from(&vm);
        let (_, a) = key(0xa);
        assert!(matches!(
            account.constructor(ENTRY_POINT, alloc::vec![a], U256::from(2u64), String::new()),
            Err(AccountError::InvalidSignerSet(_))
        ));
        assert!(matches!(
            account.constructor(ENTRY_POINT, Vec::new(), U256::from(1u64), String::new()),
            Err(AccountError::InvalidSignerSet(_))
        ));
    }

    #[test]
    fn validates_direct_multisig_user_operation() {
        let Fixture { keys, mut account, .. } = deployed();

        let (op, hash) = signed_op(&[&keys[0].0, &keys[2].0]);
        assert_eq!(
            account.validate_user_op(tuple(&op), hash, U256::ZERO),
            Ok(SIG_VALIDATION_SUCCESS)
        );

        let (op, hash) = signed_op(&[&keys[0].0]);
        assert_eq!(
            account.validate_user_op(tuple(&op), hash, U256::ZERO),
            Err(AccountError::InsufficientSignatures(InsufficientSignatures {
                required: U256::from(2u64),
                provided: U256::from(1u64),
            }))
        );

        let (stranger_key, stranger) = key(0xd);
        let (op, hash) = signed_op(&[&keys[0].0, &stranger_key]);
        assert_eq!(
            account.validate_user_op(tuple(&op), hash, U256::ZERO),
            Err(AccountError::UnknownSigner(UnknownSigner { signer: stranger }))
        );
    }

    #[test]
    fn validate_user_op_is_entry_point_only_and_hash_bound() {
        let Fixture { vm, keys, mut account } = deployed();
        let (op, hash) = signed_op(&[&keys[0].0, &keys[1].0]);

        let other = FixedBytes::repeat_byte(1);
        assert_eq!(
            account.validate_user_op(tuple(&op), other, U256::ZERO),
            Err(AccountError::UserOpHashMismatch(UserOpHashMismatch {
                expected: hash,
                provided: other,
            }))
        );

        vm.set_sender(STRANGER);
        assert_eq!(
            account.validate_user_op(tuple(&op), hash, U256::ZERO),
            Err(AccountError::NotFromEntryPoint(NotFromEntryPoint { caller: STRANGER }))
        );
    }

    #[test]
    fn update_signers_rotates_owners_once() {
        let Fixture { keys, mut account, .. } = deployed();
        let (_, d) = key(0xd);
        let new_owners = alloc::vec![keys[0].1, d];
        let auth = update_authorization(&[&keys[1].0, &keys[2].0], &new_owners, 1, 0);

        assert_eq!(
            account.signer_update_hash(new_owners.clone(), U256::from(1u64), U256::ZERO),
            signer_update_hash(&domain(ACCOUNT), &new_owners, U256::from(1u64), U256::ZERO)
                .map_err(AccountError::from)
        );
        assert_eq!(
            account.update_signers(new_owners.clone(), U256::from(1u64), auth.clone()),
            Ok(())
        );
        assert_eq!(account.get_owners(), new_owners);
        assert_eq!(account.threshold(), U256::from(1u64));
        assert_eq!(account.signer_nonce(), U256::from(1u64));
        assert!(account.is_owner(d));
        assert!(!account.is_owner(keys[1].1));

        assert_eq!(
            account.update_signers(new_owners, U256::from(1u64), auth),
            Err(AccountError::StaleNonce(StaleNonce {
                expected: U256::from(1u64),
                provided: U256::ZERO,
            }))
        );
    }

    #[test]
    fn update_signers_below_threshold_changes_nothing() {
        let Fixture { keys, mut account, .. } = deployed();
        let new_owners = alloc::vec![keys[0].1];
        let auth = update_authorization(&[&keys[0].0], &new_owners, 1, 0);

        assert!(matches!(
            account.update_signers(new_owners, U256::from(1u64), auth),
            Err(AccountError::InsufficientSignatures(_))
        ));
        assert_eq!(account.get_owners().len(), 3);
        assert_eq!(account.threshold(), U256::from(2u64));
        assert_eq!(account.signer_nonce(), U256::ZERO);
    }

    #[test]
    fn update_signers_rejects_other_callers() {
        let Fixture { vm, keys, mut account } = deployed();
        let new_owners = alloc::vec![keys[0].1];
        let auth = update_authorization(&[&keys[0].0, &keys[1].0], &new_owners, 1, 0);

        vm.set_sender(STRANGER);
        assert_eq!(
            account.update_signers(new_owners, U256::from(1u64), auth),
            Err(AccountError::UnauthorizedMutation(UnauthorizedMutation { caller: STRANGER }))
        );
        assert_eq!(account.get_owners().len(), 3);
    }

    #[test]
    fn decode_signature_exposes_payload() {
        let Fixture { keys, account, .. } = deployed();
        let hash = FixedBytes::repeat_byte(0x44);
        let link = SignedDelegation {
            message: Delegation {
                delegate: STRANGER,
                caveats: alloc::vec![Caveat {
                    enforcer: Address::repeat_byte(0xb1),
                    terms: alloc::vec![0u8, 0, 0, 0, 0, 0x0f, 0x42, 0x40].into(),
                }],
                gasLimit: U256::from(250_000u64),
                ..Default::default()
            },
            signature: alloc::vec![1u8, 2, 3].into(),
            signer: ACCOUNT,
        };
        let payload = SignaturePayload {
            signatures: alloc::vec![ecdsa_entry(&keys[0].0, hash)],
            delegations: alloc::vec![link],
        };

        let (entries, delegations) = account.decode_signature(Bytes(payload.encode())).unwrap();
        assert_eq!(entries, alloc::vec![entry_tuple(&payload.signatures[0])]);
        assert_eq!(entries[0].0, Address::ZERO);
        assert_eq!(delegations.len(), 1);
        let ((delegate, authority, caveats, gas_limit, _), signature, signer) = &delegations[0];
        assert_eq!(*delegate, STRANGER);
        assert_eq!(*authority, FixedBytes::ZERO);
        assert_eq!(caveats[0].0, Address::repeat_byte(0xb1));
        assert_eq!(caveats[0].1 .0.len(), 8);
        assert_eq!(*gas_limit, U256::from(250_000u64));
        assert_eq!(signature.0, alloc::vec![1u8, 2, 3]);
        assert_eq!(*signer, ACCOUNT);

        assert_eq!(
            account.decode_signature(Bytes(alloc::vec![0xde, 0xad])),
            Err(AccountError::InvalidSignatureEncoding(InvalidSignatureEncoding {}))
        );
    }

    #[test]
    fn erc1271_checks_owner_threshold() {
        let Fixture { keys, account, .. } = deployed();
        let hash = FixedBytes::repeat_byte(0x33);
        let both = encode_signature_entries(&[
            ecdsa_entry(&keys[0].0, hash),
            ecdsa_entry(&keys[1].0, hash),
        ]);
        assert_eq!(account.is_valid_signature(hash, Bytes(both)), ERC1271_MAGIC_VALUE);

        let one = encode_signature_entries(&[ecdsa_entry(&keys[0].0, hash)]);
        assert_eq!(account.is_valid_signature(hash, Bytes(one)), ERC1271_INVALID);
        assert_eq!(
            account.is_valid_signature(hash, Bytes(sign(&keys[0].0, hash))),
            ERC1271_INVALID
        );
    }
}
