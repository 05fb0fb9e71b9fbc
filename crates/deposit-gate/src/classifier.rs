//! Derives a [`DepositType`] from the raw deposit arguments.

use crate::error::{GateError, GateResult};
use crate::types::{DepositType, SIGNATURE_LEN, WITHDRAWAL_CREDENTIALS_LEN};

/// Classify a deposit.
///
/// A 96-byte all-zero signature together with 32-byte all-zero credentials
/// marks a top-up. Anything else is categorized by the first credential byte.
/// Lengths are not otherwise validated here; that is the deposit pipeline's
/// job.
pub fn classify(withdrawal_credentials: &[u8], signature: &[u8]) -> GateResult<DepositType> {
    if is_top_up(withdrawal_credentials, signature) {
        return Ok(DepositType::TOP_UP);
    }

    withdrawal_credentials
        .first()
        .map(|prefix| DepositType(u16::from(*prefix)))
        .ok_or(GateError::InvalidCredentials)
}

fn is_top_up(withdrawal_credentials: &[u8], signature: &[u8]) -> bool {
    signature.len() == SIGNATURE_LEN
        && withdrawal_credentials.len() == WITHDRAWAL_CREDENTIALS_LEN
        && signature.iter().all(|b| *b == 0)
        && withdrawal_credentials.iter().all(|b| *b == 0)
}
