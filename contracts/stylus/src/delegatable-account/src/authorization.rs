//! Account authorization engine.
//!
//! A signature payload with no delegations is **direct**: the account's own owners sign the
//! user operation hash. Otherwise it is **delegated**: the chain is validated first and the
//! user operation must then be signed by the owners of the innermost delegate.

use alloy_sol_types::SolCall;
use delegatable_account_types::{
    hash_user_operation, Action, EnforcerRegistry, Eip712Domain, ExecutionContext,
    SignaturePayload, UserOperation,
};
use stylus_sdk::alloy_primitives::{Address, Bytes, FixedBytes, U256};

use crate::{
    authority::AuthorityState, chain::ChainValidator, errors::ValidationError,
    interfaces::IDelegatableAccount, signatures::verify_threshold,
};

/// How a call was authorized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationMode {
    Direct,
    Delegated { delegate: Address },
}

pub struct Authorizer<'a, S: ?Sized, R: ?Sized> {
    pub domain: Eip712Domain,
    pub account: Address,
    pub state: &'a S,
    pub enforcers: &'a R,
}

impl<S, R> Authorizer<'_, S, R>
where
    S: AuthorityState + ?Sized,
    R: EnforcerRegistry + ?Sized,
{
    /// Authorize `action` given `payload`, whose top-level signatures cover `digest`.
    pub fn authorize(
        &self,
        payload: &SignaturePayload,
        digest: FixedBytes<32>,
        action: &Action,
        context: &ExecutionContext,
    ) -> Result<AuthorizationMode, ValidationError> {
        if !payload.is_delegated() {
            let set = self.state.signer_set(self.account)?;
            verify_threshold(self.state, digest, &payload.signatures, &set)?;
            return Ok(AuthorizationMode::Direct);
        }

        let validator = ChainValidator {
            domain: &self.domain,
            account: self.account,
            state: self.state,
            enforcers: self.enforcers,
        };
        let delegate = validator.validate(&payload.delegations, action, context)?;

        let set = self.state.signer_set(delegate)?;
        verify_threshold(self.state, digest, &payload.signatures, &set)?;
        Ok(AuthorizationMode::Delegated { delegate })
    }

    /// Full `validateUserOp` check: the hash the EntryPoint supplied must be the one this
    /// account derives for `op`, and `op.signature` must authorize `op.callData`.
    pub fn authorize_user_operation(
        &self,
        op: &UserOperation,
        user_op_hash: FixedBytes<32>,
        entry_point: Address,
        chain_id: u64,
        context: &ExecutionContext,
    ) -> Result<AuthorizationMode, ValidationError> {
        let expected = hash_user_operation(op, entry_point, chain_id);
        if expected != user_op_hash {
            return Err(ValidationError::UserOpHashMismatch {
                expected,
                provided: user_op_hash,
            });
        }

        let payload = SignaturePayload::decode(&op.signature)
            .map_err(|_| ValidationError::InvalidSignatureEncoding)?;
        let action = action_for_call(self.account, &op.callData)?;
        let context = ExecutionContext {
            account: self.account,
            call_gas_limit: op.callGasLimit,
            ..*context
        };
        self.authorize(&payload, user_op_hash, &action, &context)
    }
}

/// The call `call_data` will make once the EntryPoint executes it.
///
/// `execute(target, value, data)` is unwrapped; anything else is a call on the account itself.
pub fn action_for_call(account: Address, call_data: &[u8]) -> Result<Action, ValidationError> {
    if call_data.starts_with(&IDelegatableAccount::executeCall::SELECTOR) {
        let call = IDelegatableAccount::executeCall::abi_decode(call_data, true)
            .map_err(|_| ValidationError::MalformedCallData)?;
        return Ok(Action {
            to: call.target,
            value: call.value,
            data: call.data,
        });
    }
    Ok(Action {
        to: account,
        value: U256::ZERO,
        data: Bytes::copy_from_slice(call_data),
    })
}
