//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! This module provides:
//! - [`derive`] — generic PBKDF2-HMAC-SHA256 over any iteration count and output length
//! - [`derive_aes256_key`] — the fixed parameter set used by the `aes256` blob scheme
//!
//! Derivation is a pure function: identical inputs always yield identical
//! output. Keys are recomputed for every decrypt call and never cached.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use crate::symmetric::KEY_LEN;

/// Iteration count used by the `aes256` scheme. Fixed by the device firmware.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length stored at the front of an `aes256` blob.
pub const SALT_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive `output_len` bytes from `passphrase` and `salt` with PBKDF2-HMAC-SHA256.
///
/// Empty passphrases and salts are accepted; PBKDF2 defines both.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if `iterations` or `output_len` is zero.
pub fn derive(
    passphrase: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<SecretBuffer, CryptoError> {
    if iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "PBKDF2 iterations must be at least 1".into(),
        ));
    }
    if output_len == 0 {
        return Err(CryptoError::KeyDerivation(
            "PBKDF2 output length must be at least 1 byte".into(),
        ));
    }

    let mut output = vec![0u8; output_len];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(passphrase, salt, iterations, &mut output);
    Ok(SecretBuffer::from_vec(output))
}

/// Derive the 256-bit AES key for an `aes256` blob.
///
/// Uses [`PBKDF2_ITERATIONS`] and [`KEY_LEN`].
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if the salt is not [`SALT_LEN`] bytes.
pub fn derive_aes256_key(passphrase: &[u8], salt: &[u8]) -> Result<SecretBuffer, CryptoError> {
    if salt.len() != SALT_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "invalid salt length: {} bytes (expected {SALT_LEN})",
            salt.len()
        )));
    }
    derive(passphrase, salt, PBKDF2_ITERATIONS, KEY_LEN)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
