//! Secure random number generation.
//!
//! All randomness comes from the operating system CSPRNG.

use crate::CodecError;
use crate::aead::NONCE_SIZE;

/// Fill a buffer with random bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CodecError::RandomFailed`] if the underlying OS CSPRNG fails.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CodecError> {
    getrandom::getrandom(buf).map_err(|_| CodecError::RandomFailed)
}

/// Generate a random 12-byte nonce.
///
/// # Errors
///
/// Returns [`CodecError::RandomFailed`] if the underlying OS CSPRNG fails.
pub fn random_nonce() -> Result<[u8; NONCE_SIZE], CodecError> {
    let mut buf = [0u8; NONCE_SIZE];
    fill_random(&mut buf)?;
    Ok(buf)
}
