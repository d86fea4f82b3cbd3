//! Bundler / paymaster JSON-RPC interface.
//!
//! Transport is left to the implementor; this module fixes the request shapes, the
//! responses the tooling relies on, and a bounded receipt poll.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::wire::RpcUserOperation;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }

    pub fn send_user_operation(id: u64, op: &RpcUserOperation, entry_point: Address) -> Self {
        Self::new(id, "eth_sendUserOperation", json!([op, entry_point]))
    }

    pub fn estimate_user_operation_gas(id: u64, op: &RpcUserOperation, entry_point: Address) -> Self {
        Self::new(id, "eth_estimateUserOperationGas", json!([op, entry_point]))
    }

    pub fn get_user_operation_receipt(id: u64, user_op_hash: B256) -> Self {
        Self::new(id, "eth_getUserOperationReceipt", json!([user_op_hash]))
    }

    pub fn sponsor_user_operation(id: u64, op: &RpcUserOperation, entry_point: Address) -> Self {
        Self::new(
            id,
            "pm_sponsorUserOperation",
            json!([op, { "entryPoint": entry_point }]),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    pub pre_verification_gas: U256,
    pub verification_gas: U256,
    pub call_gas_limit: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub paymaster_and_data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    pub user_op_hash: B256,
    pub sender: Address,
    pub nonce: U256,
    pub success: bool,
    pub actual_gas_cost: U256,
    pub actual_gas_used: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The four bundler/paymaster calls the tooling uses. Implementations must be safe to retry.
#[allow(async_fn_in_trait)]
pub trait BundlerRpc {
    async fn send_user_operation(&self, op: &RpcUserOperation, entry_point: Address) -> Result<B256>;

    async fn estimate_user_operation_gas(
        &self,
        op: &RpcUserOperation,
        entry_point: Address,
    ) -> Result<GasEstimate>;

    /// `None` until the operation is included.
    async fn get_user_operation_receipt(&self, user_op_hash: B256) -> Result<Option<UserOperationReceipt>>;

    async fn sponsor_user_operation(&self, op: &RpcUserOperation, entry_point: Address) -> Result<Sponsorship>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 30,
            delay: Duration::from_secs(2),
        }
    }
}

/// Poll for a receipt at most `policy.attempts` times, sleeping `policy.delay` in between.
pub async fn wait_for_receipt<B: BundlerRpc>(
    bundler: &B,
    user_op_hash: B256,
    policy: RetryPolicy,
) -> Result<UserOperationReceipt> {
    for attempt in 0..policy.attempts {
        if let Some(receipt) = bundler.get_user_operation_receipt(user_op_hash).await? {
            return Ok(receipt);
        }
        if attempt + 1 < policy.attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }
    Err(anyhow!(
        "no receipt for user operation {user_op_hash} after {} attempts",
        policy.attempts
    ))
}
