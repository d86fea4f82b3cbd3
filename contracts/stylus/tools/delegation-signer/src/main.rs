use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use delegatable_account_types::{hash_user_operation, Delegation, SignedDelegation, UserOperation};
use delegation_signer::{
    encoder::{
        account_domain, allowed_methods_terms, authorize_signer_update, block_number_after_terms,
        delegation_hash, execute_call_data, selector, sign_delegation, sign_user_op,
        update_signers_call_data,
    },
    relay::JsonRpcRequest,
    signer::LocalSigner,
    wire::{DelegationJson, RpcUserOperation, SignedDelegationJson},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Produce the signatures, hashes and call data a delegatable account verifies.
///
/// Keys come from `--private-key` (repeatable) or `PKEY` (comma separated), in the order
/// their signatures should appear.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long = "private-key", env = "PKEY", value_delimiter = ',', global = true, hide_env_values = true)]
    private_keys: Vec<String>,

    #[arg(long, env = "CHAIN_ID", default_value_t = 31337, global = true)]
    chain_id: u64,

    /// EIP-712 domain name the account was initialized with.
    #[arg(long, env = "ACCOUNT_NAME", default_value = "Smart Account", global = true)]
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the address of every configured key.
    Address,
    /// Hash a user operation (JSON, bundler format).
    UserOpHash {
        #[arg(long)]
        op: PathBuf,
        #[arg(long, env = "ENTRY_POINT")]
        entry_point: Address,
    },
    /// Sign a delegation (JSON) under `account`'s domain.
    SignDelegation {
        #[arg(long)]
        delegation: PathBuf,
        /// Account that verifies the chain.
        #[arg(long, env = "ACCOUNT")]
        account: Address,
        /// Grantor of the delegation; defaults to `account`.
        #[arg(long)]
        signer: Option<Address>,
    },
    /// Hash a signed delegation; the result is the `authority` of the next link.
    DelegationHash {
        #[arg(long)]
        delegation: PathBuf,
        #[arg(long, env = "ACCOUNT")]
        account: Address,
    },
    /// Fill in the signature of a user operation, optionally redeeming a delegation chain.
    SignUserOp {
        #[arg(long)]
        op: PathBuf,
        #[arg(long, env = "ENTRY_POINT")]
        entry_point: Address,
        /// JSON array of signed delegations, outermost first.
        #[arg(long)]
        delegations: Option<PathBuf>,
    },
    /// Authorize a new owner set and print the `updateSigners` call data.
    AuthorizeUpdate {
        #[arg(long, env = "ACCOUNT")]
        account: Address,
        #[arg(long = "owner", value_delimiter = ',', required = true)]
        owners: Vec<Address>,
        #[arg(long)]
        threshold: U256,
        /// Current signer nonce of the account.
        #[arg(long, default_value_t = U256::ZERO)]
        nonce: U256,
    },
    /// Encode `execute(target, value, data)` call data.
    Execute {
        #[arg(long)]
        target: Address,
        #[arg(long, default_value_t = U256::ZERO)]
        value: U256,
        #[arg(long, default_value = "0x")]
        data: Bytes,
    },
    /// Encode caveat terms.
    Terms {
        #[command(subcommand)]
        kind: Terms,
    },
    /// Print the JSON-RPC request body for a bundler or paymaster call.
    Rpc {
        #[arg(long, default_value_t = 1)]
        id: u64,
        #[command(subcommand)]
        call: RpcCall,
    },
}

#[derive(Subcommand, Debug)]
enum RpcCall {
    /// `eth_sendUserOperation`
    Send {
        #[arg(long)]
        op: PathBuf,
        #[arg(long, env = "ENTRY_POINT")]
        entry_point: Address,
    },
    /// `eth_estimateUserOperationGas`
    Estimate {
        #[arg(long)]
        op: PathBuf,
        #[arg(long, env = "ENTRY_POINT")]
        entry_point: Address,
    },
    /// `pm_sponsorUserOperation`
    Sponsor {
        #[arg(long)]
        op: PathBuf,
        #[arg(long, env = "ENTRY_POINT")]
        entry_point: Address,
    },
    /// `eth_getUserOperationReceipt`
    Receipt { user_op_hash: B256 },
}

#[derive(Subcommand, Debug)]
enum Terms {
    /// Valid from block `block` onwards.
    BlockNumberAfter { block: u64 },
    /// Restrict calls to the listed function signatures, e.g. `transfer(address,uint256)`.
    AllowedMethods {
        #[arg(required = true)]
        methods: Vec<String>,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let output = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<Value> {
    match &cli.command {
        Command::Address => {
            let signers = load_signers(&cli.private_keys)?;
            Ok(json!(signers.iter().map(LocalSigner::address).collect::<Vec<_>>()))
        }
        Command::UserOpHash { op, entry_point } => {
            let op: RpcUserOperation = read_json(op)?;
            let hash = hash_user_operation(&UserOperation::from(op), *entry_point, cli.chain_id);
            Ok(json!({ "userOpHash": hash }))
        }
        Command::SignDelegation {
            delegation,
            account,
            signer,
        } => {
            let signers = load_signers(&cli.private_keys)?;
            let delegation: Delegation = read_json::<DelegationJson>(delegation)?.into();
            let domain = account_domain(&cli.name, cli.chain_id, *account);
            let signed = sign_delegation(
                &domain,
                delegation,
                signer.unwrap_or(*account),
                &signers.iter().collect::<Vec<_>>(),
            )?;
            let hash = delegation_hash(&domain, &signed)?;
            Ok(json!({
                "signedDelegation": SignedDelegationJson::from(&signed),
                "delegationHash": hash,
            }))
        }
        Command::DelegationHash {
            delegation,
            account,
        } => {
            let signed: SignedDelegation = read_json::<SignedDelegationJson>(delegation)?.into();
            let domain = account_domain(&cli.name, cli.chain_id, *account);
            Ok(json!({ "delegationHash": delegation_hash(&domain, &signed)? }))
        }
        Command::SignUserOp {
            op,
            entry_point,
            delegations,
        } => {
            let signers = load_signers(&cli.private_keys)?;
            let mut op = UserOperation::from(read_json::<RpcUserOperation>(op)?);
            let delegations = match delegations {
                Some(path) => read_json::<Vec<SignedDelegationJson>>(path)?
                    .into_iter()
                    .map(SignedDelegation::from)
                    .collect(),
                None => Vec::new(),
            };
            let hash = sign_user_op(
                &mut op,
                *entry_point,
                cli.chain_id,
                &signers.iter().collect::<Vec<_>>(),
                delegations,
            )?;
            Ok(json!({
                "userOpHash": hash,
                "userOperation": RpcUserOperation::from(&op),
            }))
        }
        Command::AuthorizeUpdate {
            account,
            owners,
            threshold,
            nonce,
        } => {
            let signers = load_signers(&cli.private_keys)?;
            let domain = account_domain(&cli.name, cli.chain_id, *account);
            let authorization = authorize_signer_update(
                &domain,
                owners,
                *threshold,
                *nonce,
                &signers.iter().collect::<Vec<_>>(),
            )?;
            let call_data = update_signers_call_data(owners, *threshold, authorization.clone());
            Ok(json!({
                "authorization": Bytes::from(authorization),
                "callData": Bytes::from(call_data),
            }))
        }
        Command::Execute {
            target,
            value,
            data,
        } => Ok(json!({
            "callData": Bytes::from(execute_call_data(*target, *value, data.clone())),
        })),
        Command::Terms { kind } => {
            let terms = match kind {
                Terms::BlockNumberAfter { block } => block_number_after_terms(*block),
                Terms::AllowedMethods { methods } => {
                    let selectors = methods.iter().map(|m| parse_selector(m)).collect::<Result<Vec<_>>>()?;
                    allowed_methods_terms(&selectors)
                }
            };
            Ok(json!({ "terms": Bytes::from(terms) }))
        }
        Command::Rpc { id, call } => Ok(serde_json::to_value(rpc_request(*id, call)?)?),
    }
}

fn rpc_request(id: u64, call: &RpcCall) -> Result<JsonRpcRequest> {
    Ok(match call {
        RpcCall::Send { op, entry_point } => {
            JsonRpcRequest::send_user_operation(id, &read_json(op)?, *entry_point)
        }
        RpcCall::Estimate { op, entry_point } => {
            JsonRpcRequest::estimate_user_operation_gas(id, &read_json(op)?, *entry_point)
        }
        RpcCall::Sponsor { op, entry_point } => {
            JsonRpcRequest::sponsor_user_operation(id, &read_json(op)?, *entry_point)
        }
        RpcCall::Receipt { user_op_hash } => JsonRpcRequest::get_user_operation_receipt(id, *user_op_hash),
    })
}

fn load_signers(keys: &[String]) -> Result<Vec<LocalSigner>> {
    if keys.is_empty() {
        return Err(anyhow!("missing signing key: provide --private-key (or set PKEY)"));
    }
    keys.iter()
        .enumerate()
        .map(|(i, key)| LocalSigner::from_hex(key).with_context(|| format!("private key #{i}")))
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Accepts either a 4-byte hex selector or a canonical signature.
fn parse_selector(method: &str) -> Result<[u8; 4]> {
    if method.contains('(') {
        return Ok(selector(method));
    }
    let raw = hex::decode(method.trim_start_matches("0x")).context("invalid selector hex")?;
    <[u8; 4]>::try_from(raw.as_slice()).map_err(|_| anyhow!("selector must be 4 bytes: {method}"))
}
