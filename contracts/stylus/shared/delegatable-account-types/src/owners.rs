//! k-of-n owner set.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

/// Reasons an owner set / threshold pair is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerSetError {
    NoOwners,
    ZeroAddressOwner,
    DuplicateOwner(Address),
    /// `threshold` must satisfy `1 <= threshold <= owners`.
    InvalidThreshold { threshold: U256, owners: usize },
}

/// Owners in insertion order plus the number of distinct owner signatures required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerSet {
    owners: Vec<Address>,
    threshold: usize,
}

impl SignerSet {
    pub fn new(owners: Vec<Address>, threshold: U256) -> Result<Self, SignerSetError> {
        if owners.is_empty() {
            return Err(SignerSetError::NoOwners);
        }
        for (i, owner) in owners.iter().enumerate() {
            if *owner == Address::ZERO {
                return Err(SignerSetError::ZeroAddressOwner);
            }
            if owners[..i].contains(owner) {
                return Err(SignerSetError::DuplicateOwner(*owner));
            }
        }
        if threshold.is_zero() || threshold > U256::from(owners.len()) {
            return Err(SignerSetError::InvalidThreshold {
                threshold,
                owners: owners.len(),
            });
        }

        Ok(Self {
            threshold: threshold.to::<u64>() as usize,
            owners,
        })
    }

    /// 1-of-1 set for an externally-owned account.
    pub fn single(owner: Address) -> Self {
        Self {
            owners: alloc::vec![owner],
            threshold: 1,
        }
    }

    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_owner(&self, address: Address) -> bool {
        self.owners.contains(&address)
    }
}
