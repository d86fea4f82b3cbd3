//! secp256k1 signer recovery.
//!
//! On `wasm32` recovery goes through the EVM `ecrecover` precompile at `0x01`; native builds
//! (tests, ABI export) recover in-process with `k256`. Both accept `v` in {0,1,27,28}.

use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use crate::errors::ValidationError;

/// Split a 65-byte `r||s||v` signature, normalising `v` to a recovery id in {0,1}.
fn split_signature(sig: &[u8]) -> Result<(&[u8], u8), ValidationError> {
    if sig.len() != 65 {
        return Err(ValidationError::InvalidSignatureEncoding);
    }
    let recovery_id = match sig[64] {
        0 | 1 => sig[64],
        27 | 28 => sig[64] - 27,
        _ => return Err(ValidationError::InvalidSignatureEncoding),
    };
    Ok((&sig[..64], recovery_id))
}

/// Recover the address that signed `digest`.
#[cfg(target_arch = "wasm32")]
pub fn recover_signer(digest: FixedBytes<32>, sig: &[u8]) -> Result<Address, ValidationError> {
    use stylus_sdk::call::RawCall;

    let (rs, recovery_id) = split_signature(sig)?;

    let mut precompile = [0u8; 20];
    precompile[19] = 1;
    let to = Address::from_slice(&precompile);

    let mut input = [0u8; 128];
    input[0..32].copy_from_slice(digest.as_slice());
    // v as 32-byte big-endian word.
    input[63] = recovery_id + 27;
    input[64..128].copy_from_slice(rs);

    let out = unsafe { RawCall::new_static().gas(50_000).call(to, &input) }
        .map_err(|_| ValidationError::InvalidSignatureEncoding)?;
    // Empty output means the precompile could not recover a key.
    if out.len() < 32 {
        return Err(ValidationError::InvalidSignatureEncoding);
    }
    let recovered = Address::from_slice(&out[12..32]);
    if recovered == Address::ZERO {
        return Err(ValidationError::InvalidSignatureEncoding);
    }
    Ok(recovered)
}

/// Recover the address that signed `digest`.
#[cfg(not(target_arch = "wasm32"))]
pub fn recover_signer(digest: FixedBytes<32>, sig: &[u8]) -> Result<Address, ValidationError> {
    use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
    use stylus_sdk::alloy_primitives::keccak256;

    let (rs, recovery_id) = split_signature(sig)?;
    let signature =
        Signature::from_slice(rs).map_err(|_| ValidationError::InvalidSignatureEncoding)?;
    let recovery_id =
        RecoveryId::from_byte(recovery_id).ok_or(ValidationError::InvalidSignatureEncoding)?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        .map_err(|_| ValidationError::InvalidSignatureEncoding)?;

    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Ok(Address::from_slice(&hash[12..]))
}
