//! JSON shapes used by the CLI and the bundler API (camelCase, hex quantities).

use alloy_primitives::{Address, Bytes, B256, U256};
use delegatable_account_types::{Caveat, Delegation, SignedDelegation, UserOperation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcUserOperation {
    pub sender: Address,
    pub nonce: U256,
    #[serde(default)]
    pub init_code: Bytes,
    #[serde(default)]
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    #[serde(default)]
    pub paymaster_and_data: Bytes,
    #[serde(default)]
    pub signature: Bytes,
}

impl From<&UserOperation> for RpcUserOperation {
    fn from(op: &UserOperation) -> Self {
        Self {
            sender: op.sender,
            nonce: op.nonce,
            init_code: op.initCode.clone(),
            call_data: op.callData.clone(),
            call_gas_limit: op.callGasLimit,
            verification_gas_limit: op.verificationGasLimit,
            pre_verification_gas: op.preVerificationGas,
            max_fee_per_gas: op.maxFeePerGas,
            max_priority_fee_per_gas: op.maxPriorityFeePerGas,
            paymaster_and_data: op.paymasterAndData.clone(),
            signature: op.signature.clone(),
        }
    }
}

impl From<RpcUserOperation> for UserOperation {
    fn from(op: RpcUserOperation) -> Self {
        Self {
            sender: op.sender,
            nonce: op.nonce,
            initCode: op.init_code,
            callData: op.call_data,
            callGasLimit: op.call_gas_limit,
            verificationGasLimit: op.verification_gas_limit,
            preVerificationGas: op.pre_verification_gas,
            maxFeePerGas: op.max_fee_per_gas,
            maxPriorityFeePerGas: op.max_priority_fee_per_gas,
            paymasterAndData: op.paymaster_and_data,
            signature: op.signature,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveatJson {
    pub enforcer: Address,
    pub terms: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationJson {
    pub delegate: Address,
    #[serde(default)]
    pub authority: B256,
    #[serde(default)]
    pub caveats: Vec<CaveatJson>,
    #[serde(default)]
    pub gas_limit: U256,
    #[serde(default)]
    pub nonce: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDelegationJson {
    pub message: DelegationJson,
    pub signature: Bytes,
    pub signer: Address,
}

impl From<DelegationJson> for Delegation {
    fn from(d: DelegationJson) -> Self {
        Self {
            delegate: d.delegate,
            authority: d.authority,
            caveats: d
                .caveats
                .into_iter()
                .map(|c| Caveat {
                    enforcer: c.enforcer,
                    terms: c.terms,
                })
                .collect(),
            gasLimit: d.gas_limit,
            nonce: d.nonce,
        }
    }
}

impl From<&Delegation> for DelegationJson {
    fn from(d: &Delegation) -> Self {
        Self {
            delegate: d.delegate,
            authority: d.authority,
            caveats: d
                .caveats
                .iter()
                .map(|c| CaveatJson {
                    enforcer: c.enforcer,
                    terms: c.terms.clone(),
                })
                .collect(),
            gas_limit: d.gasLimit,
            nonce: d.nonce,
        }
    }
}

impl From<SignedDelegationJson> for SignedDelegation {
    fn from(s: SignedDelegationJson) -> Self {
        Self {
            message: s.message.into(),
            signature: s.signature,
            signer: s.signer,
        }
    }
}

impl From<&SignedDelegation> for SignedDelegationJson {
    fn from(s: &SignedDelegation) -> Self {
        Self {
            message: (&s.message).into(),
            signature: s.signature.clone(),
            signer: s.signer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_operation_json_is_camel_case_hex() {
        let op = RpcUserOperation {
            sender: Address::repeat_byte(0x11),
            nonce: U256::from(2u64),
            call_gas_limit: U256::from(100_000u64),
            ..Default::default()
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["callGasLimit"], "0x186a0");
        assert_eq!(json["nonce"], "0x2");
        assert_eq!(json["initCode"], "0x");

        let back: RpcUserOperation = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn delegation_json_fills_defaults() {
        let json = serde_json::json!({
            "delegate": "0x5959595959595959595959595959595959595959",
            "caveats": [{ "enforcer": "0xb1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1", "terms": "0x00000000000f4240" }],
            "gasLimit": "0x0"
        });
        let parsed: DelegationJson = serde_json::from_value(json).unwrap();
        let delegation = Delegation::from(parsed);
        assert_eq!(delegation.authority, B256::ZERO);
        assert_eq!(delegation.nonce, U256::ZERO);
        assert_eq!(delegation.caveats[0].terms.len(), 8);
    }
}
