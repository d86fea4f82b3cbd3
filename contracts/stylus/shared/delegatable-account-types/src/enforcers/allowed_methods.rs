//! Restricts the proposed call to an allow-list of function selectors.
//!
//! Terms: one or more packed 4-byte selectors.

use alloc::vec::Vec;

use super::{Action, CaveatDenied, CaveatEnforcer, ExecutionContext};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllowedMethodsEnforcer;

pub fn allowed_methods_terms(selectors: &[[u8; 4]]) -> Vec<u8> {
    selectors.concat()
}

impl CaveatEnforcer for AllowedMethodsEnforcer {
    fn enforce_caveat(
        &self,
        terms: &[u8],
        action: &Action,
        _context: &ExecutionContext,
    ) -> Result<(), CaveatDenied> {
        if terms.is_empty() || terms.len() % 4 != 0 {
            return Err(CaveatDenied::MalformedTerms);
        }
        let Some(selector) = action.data.get(..4) else {
            return Err(CaveatDenied::Rejected);
        };
        if terms.chunks_exact(4).any(|allowed| allowed == selector) {
            Ok(())
        } else {
            Err(CaveatDenied::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;

    const TRANSFER: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
    const APPROVE: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];
    const SET_PURPOSE: [u8; 4] = [0xeb, 0x68, 0x75, 0x7f];

    fn calling(data: &[u8]) -> Action {
        Action {
            data: Bytes::copy_from_slice(data),
            ..Default::default()
        }
    }

    #[test]
    fn allows_listed_selectors_only() {
        let terms = allowed_methods_terms(&[TRANSFER, SET_PURPOSE]);
        let context = ExecutionContext::default();

        let mut transfer = TRANSFER.to_vec();
        transfer.extend_from_slice(&[0u8; 64]);
        assert_eq!(AllowedMethodsEnforcer.enforce_caveat(&terms, &calling(&transfer), &context), Ok(()));
        assert_eq!(AllowedMethodsEnforcer.enforce_caveat(&terms, &calling(&SET_PURPOSE), &context), Ok(()));
        assert_eq!(
            AllowedMethodsEnforcer.enforce_caveat(&terms, &calling(&APPROVE), &context),
            Err(CaveatDenied::Rejected)
        );
    }

    #[test]
    fn plain_transfers_have_no_selector() {
        let terms = allowed_methods_terms(&[TRANSFER]);
        assert_eq!(
            AllowedMethodsEnforcer.enforce_caveat(&terms, &calling(&[]), &ExecutionContext::default()),
            Err(CaveatDenied::Rejected)
        );
    }

    #[test]
    fn malformed_terms_are_denied() {
        let context = ExecutionContext::default();
        assert_eq!(
            AllowedMethodsEnforcer.enforce_caveat(&[], &calling(&TRANSFER), &context),
            Err(CaveatDenied::MalformedTerms)
        );
        assert_eq!(
            AllowedMethodsEnforcer.enforce_caveat(&TRANSFER[..3], &calling(&TRANSFER), &context),
            Err(CaveatDenied::MalformedTerms)
        );
    }
}
