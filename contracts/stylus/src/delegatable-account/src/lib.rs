//! ERC-4337 multisig account with delegatable authority, for Arbitrum Stylus.
//!
//! Validation logic is pure and trait-driven (`authority`, `chain`, `signatures`, `store`,
//! `authorization`); `onchain` supplies the `staticcall`-backed collaborators and `account`
//! wires them to contract storage.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

pub mod account;
pub mod authority;
pub mod authorization;
pub mod chain;
pub mod constants;
pub mod errors;
pub mod interfaces;
pub mod onchain;
pub mod signatures;
pub mod store;
pub mod utils;

#[cfg(test)]
mod testing;

pub use account::DelegatableAccount;
