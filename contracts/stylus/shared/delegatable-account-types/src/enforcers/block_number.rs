//! Redeemable only from a given block onwards.
//!
//! Terms: the minimum block number as a big-endian `uint64` (exactly 8 bytes).

use alloc::vec::Vec;

use super::{Action, CaveatDenied, CaveatEnforcer, ExecutionContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockNumberAfterEnforcer;

pub fn block_number_after_terms(min_block: u64) -> Vec<u8> {
    min_block.to_be_bytes().to_vec()
}

fn min_block(terms: &[u8]) -> Result<u64, CaveatDenied> {
    let bytes: [u8; 8] = terms.try_into().map_err(|_| CaveatDenied::MalformedTerms)?;
    Ok(u64::from_be_bytes(bytes))
}

impl CaveatEnforcer for BlockNumberAfterEnforcer {
    fn enforce_caveat(
        &self,
        terms: &[u8],
        _action: &Action,
        context: &ExecutionContext,
    ) -> Result<(), CaveatDenied> {
        if context.block_number < min_block(terms)? {
            return Err(CaveatDenied::Rejected);
        }
        Ok(())
    }
}
