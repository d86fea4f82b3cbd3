use stylus_sdk::alloy_primitives::{FixedBytes, U256};

/// `IERC1271.isValidSignature` selector, returned for a valid signature.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> = FixedBytes([0x16, 0x26, 0xba, 0x7e]);
pub const ERC1271_INVALID: FixedBytes<4> = FixedBytes([0xff, 0xff, 0xff, 0xff]);

// validateUserOp return codes (no time range).
pub const SIG_VALIDATION_SUCCESS: U256 = U256::ZERO;

/// Per-call gas cap for owner-set reads, ERC-1271 checks and caveat enforcers.
pub const STATIC_CALL_GAS: u64 = 200_000;
