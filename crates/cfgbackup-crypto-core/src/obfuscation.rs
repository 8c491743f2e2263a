//! Repeating-key XOR.
//!
//! **Not encryption.** The `xor` blob scheme exists so a casual reader of
//! the firmware image does not see the configuration in clear text. Anyone
//! holding one known plaintext/ciphertext pair recovers the key, and a
//! wrong key is never detected here: it silently yields different bytes.
//!
//! The transform is its own inverse: `xor_transform(xor_transform(p, k), k) == p`.

use crate::error::CryptoError;

/// XOR every byte of `data` with the cyclically indexed byte of `key`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKeyMaterial` if `key` is empty.
pub fn xor_transform(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if key.is_empty() {
        return Err(CryptoError::InvalidKeyMaterial(
            "xor key must not be empty".into(),
        ));
    }
    Ok(data
        .iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect())
}
